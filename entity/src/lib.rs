pub mod prelude;

pub mod site_option;
