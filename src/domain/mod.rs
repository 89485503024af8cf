// Domain layer - Plain data shared by the proxy, client and views
pub mod agent;
pub mod care_profile;
pub mod dashboard;
