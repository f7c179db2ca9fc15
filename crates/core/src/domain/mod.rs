pub mod customization;
pub mod market;
pub mod profile;
pub mod template;
