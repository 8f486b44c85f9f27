mod client;

pub use client::{
    ADDRESS_REQUIRED, Client, ClientFields, ClientId, EMAIL_REQUIRED, FIELD_COUNT, FIELD_NAMES,
    GOAL_REQUIRED, NAME_REQUIRED, PHONE_REQUIRED, PLAN_REQUIRED, Validation, is_blank,
    is_valid_email, validate,
};
