//! Tera template setup for the status page.

use tera::Tera;

use crate::config::TEMPLATE_GLOB;
use crate::error::AppError;

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;

    tera.register_filter("status_class", status_class_filter);

    Ok(tera)
}

/// Map a probe row's ok flag to the CSS class used to color its table cell.
fn status_class_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let ok = value
        .as_bool()
        .ok_or_else(|| tera::Error::msg("status_class filter expects a boolean"))?;

    let class = if ok { "status-ok" } else { "status-failed" };
    Ok(tera::Value::String(class.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn status_class_maps_ok_flag() {
        let args = HashMap::new();
        assert_eq!(
            status_class_filter(&tera::Value::Bool(true), &args).unwrap(),
            tera::Value::String("status-ok".to_string())
        );
        assert_eq!(
            status_class_filter(&tera::Value::Bool(false), &args).unwrap(),
            tera::Value::String("status-failed".to_string())
        );
    }

    #[test]
    fn status_class_rejects_non_boolean() {
        let args = HashMap::new();
        assert!(status_class_filter(&tera::Value::String("ok".into()), &args).is_err());
    }

    #[test]
    fn templates_compile() {
        // Catches template syntax errors at test time rather than first render
        init_templates().unwrap();
    }
}
