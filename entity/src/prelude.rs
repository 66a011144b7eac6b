pub use super::site_option::Entity as SiteOption;
