use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Store-assigned client identifier
pub type ClientId = i32;

/// Number of editable client fields
pub const FIELD_COUNT: usize = 6;

/// Canonical field order shared by `to_array` and the insert/update statements
pub const FIELD_NAMES: [&str; FIELD_COUNT] = ["name", "email", "phone", "address", "plan", "goal"];

/// Client fields in canonical order
pub type ClientFields = [Option<String>; FIELD_COUNT];

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";
pub const EMAIL_REQUIRED: &str = "Valid email is required";
pub const PHONE_REQUIRED: &str = "Phone is required and must be a non-empty string";
pub const ADDRESS_REQUIRED: &str = "Address is required and must be a non-empty string";
pub const PLAN_REQUIRED: &str = "Plan is required and must be a non-empty string";
pub const GOAL_REQUIRED: &str = "Goal is required and must be a non-empty string";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub id: Option<ClientId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub plan: Option<String>,
    pub goal: Option<String>,
}

/// Outcome of `validate`
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Client {
    /// Build a client from an object keyed by attribute name. Missing keys stay `None`.
    pub fn from_object(object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(object))
    }

    /// Build a client from fields in canonical order
    pub fn from_array(fields: ClientFields, id: Option<ClientId>) -> Self {
        let [name, email, phone, address, plan, goal] = fields;
        Self {
            id,
            name,
            email,
            phone,
            address,
            plan,
            goal,
        }
    }

    pub fn validate(&self) -> Validation {
        validate(self)
    }

    /// Fields in canonical order, as bound to insert/update parameters
    pub fn to_array(&self) -> ClientFields {
        [
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
            self.plan.clone(),
            self.goal.clone(),
        ]
    }

    pub fn to_object(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "address": self.address,
            "plan": self.plan,
            "goal": self.goal,
        })
    }
}

/// Run every field rule and collect all violations in field order.
pub fn validate(client: &Client) -> Validation {
    let mut errors = Vec::new();

    if !is_filled(&client.name) {
        errors.push(NAME_REQUIRED.to_string());
    }
    if !client.email.as_deref().is_some_and(is_valid_email) {
        errors.push(EMAIL_REQUIRED.to_string());
    }
    if !is_filled(&client.phone) {
        errors.push(PHONE_REQUIRED.to_string());
    }
    if !is_filled(&client.address) {
        errors.push(ADDRESS_REQUIRED.to_string());
    }
    if !is_filled(&client.plan) {
        errors.push(PLAN_REQUIRED.to_string());
    }
    if !is_filled(&client.goal) {
        errors.push(GOAL_REQUIRED.to_string());
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|v| !v.trim_matches(is_blank).is_empty())
}

/// ECMAScript white space and line terminators: Unicode space separators, the ASCII
/// controls `\t` through `\r`, line/paragraph separators and the BOM.
/// Unlike `char::is_whitespace`, U+0085 is not blank and U+FEFF is.
pub fn is_blank(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Basic `local@domain.tld` shape: no whitespace, a single `@`, a non-empty
/// local part, and a domain with a `.` that has text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_blank) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
