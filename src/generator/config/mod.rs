pub mod clash;
pub mod group;
pub mod ruleconvert;
pub mod single;
