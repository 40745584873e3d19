pub mod grouped;
pub mod identifiers;
pub mod records;
pub mod tags;
pub mod website;

pub use grouped::{AchievementGroups, CvData, GroupedExperience, GroupedSkill};
pub use identifiers::ContentVersion;
pub use records::{
    Contact, Education, ExperienceRow, Patent, Publication, SkillRow, SummaryRow, Tagged,
    Weighted, DEFAULT_SKILL_ICON,
};
pub use tags::{parse_tags, ALWAYS_TAG};
pub use website::{
    WebsiteContact, WebsiteExperience, WebsitePosition, WebsitePublication, WebsiteSkill,
};
