pub mod datasource;
pub mod provider;
pub mod survey;
