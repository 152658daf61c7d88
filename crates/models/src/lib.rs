pub mod errors;
pub mod db;
pub mod validation;
pub mod status;
pub mod role;
pub mod user;
pub mod user_credentials;
pub mod otp_token;
pub mod police_station;
pub mod police_officer;
pub mod iot_device;
pub mod violation;
pub mod accused;
pub mod vehicle;
pub mod emission_report;
pub mod challan;
pub mod fir;
pub mod court;
pub mod judge;
pub mod court_case;
pub mod case_statement;

#[cfg(test)]
mod tests;
