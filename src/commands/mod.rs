use colored::Colorize;

pub mod export;
pub mod init;
pub mod register;
pub mod search;
pub mod status;

/// Report a missing mandatory field and exit. With `--json` the failure is
/// a parseable object on stdout; otherwise a plain message on stderr.
pub(crate) fn fail_missing_field(field: &str, json: bool) -> ! {
    if json {
        println!("{}", missing_field_json(field));
    } else {
        eprintln!("{} Missing required field: {}", "✗".red(), field);
    }
    std::process::exit(1);
}

fn missing_field_json(field: &str) -> serde_json::Value {
    serde_json::json!({
        "error": "missing_required_field",
        "field": field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_json_shape() {
        let value = missing_field_json("source_course");
        assert_eq!(value["error"], "missing_required_field");
        assert_eq!(value["field"], "source_course");
    }
}
