use std::collections::BTreeMap;

use super::types::ProductForm;

/// Field name -> message map surfaced alongside form errors
pub type FieldErrors = BTreeMap<String, String>;

/// Categories accepted by the product forms
pub const ALLOWED_CATEGORIES: &[&str] = &["Technology", "Clothing", "Food"];

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;

/// Validated fields for a product insert
#[derive(Debug)]
pub struct NewProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Validated fields for a partial product update
#[derive(Debug, Default)]
pub struct UpdateProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

pub fn validate_login(username: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if username.is_empty() {
        errors.insert("username".into(), "Username is required".into());
    } else if username.len() < USERNAME_MIN {
        errors.insert(
            "username".into(),
            format!("Username must be at least {USERNAME_MIN} characters"),
        );
    }

    if password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    } else if password.len() < PASSWORD_MIN {
        errors.insert(
            "password".into(),
            format!("Password must be at least {PASSWORD_MIN} characters"),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_register(
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if username.is_empty() {
        errors.insert("username".into(), "Username is required".into());
    } else if username.len() < USERNAME_MIN {
        errors.insert(
            "username".into(),
            format!("Username must be at least {USERNAME_MIN} characters"),
        );
    } else if username.len() > USERNAME_MAX {
        errors.insert(
            "username".into(),
            format!("Username must be less than {USERNAME_MAX} characters"),
        );
    }

    if password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    } else if password.len() < PASSWORD_MIN {
        errors.insert(
            "password".into(),
            format!("Password must be at least {PASSWORD_MIN} characters"),
        );
    } else if password.len() > PASSWORD_MAX {
        errors.insert(
            "password".into(),
            format!("Password must be less than {PASSWORD_MAX} characters"),
        );
    }

    if confirm_password.is_empty() {
        errors.insert(
            "confirm_password".into(),
            "Please confirm your password".into(),
        );
    } else if !errors.contains_key("password") && password != confirm_password {
        errors.insert("confirm_password".into(), "Passwords don't match".into());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Add-product validation: every field is required, including the image.
pub fn validate_new_product(form: &ProductForm) -> Result<NewProductFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = trimmed(form.name.as_deref());
    if name.is_empty() {
        errors.insert("name".into(), "Name is required".into());
    }

    let description = trimmed(form.description.as_deref());
    if description.is_empty() {
        errors.insert("description".into(), "Description is required".into());
    }

    let price = match form.price.as_deref().map(str::trim) {
        None | Some("") => {
            errors.insert("price".into(), "Price is required".into());
            0.0
        }
        Some(raw) => match parse_price(raw) {
            Ok(p) => p,
            Err(msg) => {
                errors.insert("price".into(), msg);
                0.0
            }
        },
    };

    let category = trimmed(form.category.as_deref());
    if category.is_empty() {
        errors.insert("category".into(), "Category is required".into());
    } else if let Err(msg) = check_category(&category) {
        errors.insert("category".into(), msg);
    }

    if form.image.is_none() {
        errors.insert("image".into(), "Image is required".into());
    }

    if errors.is_empty() {
        Ok(NewProductFields {
            name,
            description,
            price,
            category,
        })
    } else {
        Err(errors)
    }
}

/// Update-product validation: same constraints, but every field is optional.
pub fn validate_update_product(form: &ProductForm) -> Result<UpdateProductFields, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut fields = UpdateProductFields::default();

    if let Some(name) = form.name.as_deref() {
        let name = name.trim();
        if name.is_empty() {
            errors.insert("name".into(), "Name cannot be empty".into());
        } else {
            fields.name = Some(name.to_string());
        }
    }

    if let Some(description) = form.description.as_deref() {
        let description = description.trim();
        if description.is_empty() {
            errors.insert("description".into(), "Description cannot be empty".into());
        } else {
            fields.description = Some(description.to_string());
        }
    }

    if let Some(raw) = form.price.as_deref() {
        let raw = raw.trim();
        if !raw.is_empty() {
            match parse_price(raw) {
                Ok(p) => fields.price = Some(p),
                Err(msg) => {
                    errors.insert("price".into(), msg);
                }
            }
        }
    }

    if let Some(category) = form.category.as_deref() {
        let category = category.trim();
        if !category.is_empty() {
            match check_category(category) {
                Ok(()) => fields.category = Some(category.to_string()),
                Err(msg) => {
                    errors.insert("category".into(), msg);
                }
            }
        }
    }

    if errors.is_empty() { Ok(fields) } else { Err(errors) }
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .parse()
        .map_err(|_| "Price must be a number".to_string())?;

    if !price.is_finite() || price <= 0.0 {
        return Err("Price must be positive".to_string());
    }

    Ok(price)
}

fn check_category(category: &str) -> Result<(), String> {
    if ALLOWED_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(format!(
            "Category must be one of: {}",
            ALLOWED_CATEGORIES.join(", ")
        ))
    }
}
