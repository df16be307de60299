//! `rtk count` command - number of templates

use miette::{IntoDiagnostic, Result};
use serde_json::json;

use crate::cli::commands::utils::{load_collection, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(global, &config)?;

    match resolve_format(global, &config) {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&count_value(collection.count())).into_diagnostic()?
        ),
        OutputFormat::Yaml => print!(
            "{}",
            serde_yml::to_string(&count_value(collection.count())).into_diagnostic()?
        ),
        _ => println!("{}", collection.count()),
    }
    Ok(())
}

fn count_value(count: usize) -> serde_json::Value {
    json!({ "count": count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_value_shape() {
        let value = count_value(3);
        assert_eq!(value["count"], 3);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"count":3}"#);
    }
}
