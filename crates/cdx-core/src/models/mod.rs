pub mod action;
pub mod patient;
pub mod record;
pub mod reference;
