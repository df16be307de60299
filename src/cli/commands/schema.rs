//! Schema introspection
//!
//! Prints the published JSON Schema of the template data file so that
//! authors and tooling can see the expected fields without other docs.

use miette::{miette, Result};
use serde_json::Value;

use crate::schema::SchemaRegistry;

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Show raw JSON schema instead of formatted summary
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let registry = SchemaRegistry;
    let raw = registry
        .document_schema()
        .ok_or_else(|| miette!("Document schema is not embedded in this build"))?;

    if args.raw {
        println!("{}", raw);
        return Ok(());
    }

    let schema: Value = serde_json::from_str(&raw)
        .map_err(|e| miette!("Embedded schema is not valid JSON: {}", e))?;
    print!("{}", summarize(&schema));
    Ok(())
}

/// Field-by-field summary of the document schema
pub fn summarize(schema: &Value) -> String {
    let mut out = String::new();
    let title = schema["title"].as_str().unwrap_or("Resume Templates");
    out.push_str(&format!("{}\n{}\n", title, "=".repeat(title.len())));
    if let Some(desc) = schema["description"].as_str() {
        out.push_str(&format!("{}\n", desc));
    }
    out.push_str("\nRoot: { \"resume_templates\": [ template, ... ] }\n\n");
    out.push_str(&format!("{:<44} {:<10} {}\n", "FIELD", "TYPE", "DESCRIPTION"));
    out.push_str(&format!("{}\n", "-".repeat(80)));
    describe_object(schema, &schema["$defs"]["template"], "", &mut out);
    out.push_str("\nAll fields are required. Lists may be empty but must be present.\n");
    out
}

/// Follow a local `$ref` such as `#/$defs/string_list`
fn resolve<'a>(root: &'a Value, node: &'a Value) -> &'a Value {
    match node["$ref"].as_str().and_then(|r| r.strip_prefix("#/")) {
        Some(pointer) => root.pointer(&format!("/{}", pointer)).unwrap_or(node),
        None => node,
    }
}

fn type_name(root: &Value, node: &Value) -> String {
    let node = resolve(root, node);
    match node["type"].as_str() {
        Some("array") => {
            let items = resolve(root, &node["items"]);
            match items["type"].as_str() {
                Some(t) => format!("{}[]", t),
                None => "array".to_string(),
            }
        }
        Some(t) => t.to_string(),
        None => "any".to_string(),
    }
}

fn describe_object(root: &Value, node: &Value, prefix: &str, out: &mut String) {
    let node = resolve(root, node);
    let Some(props) = node["properties"].as_object() else {
        return;
    };
    for (name, prop) in props {
        let path = format!("{}{}", prefix, name);
        let desc = prop["description"].as_str().unwrap_or("");
        out.push_str(&format!("{:<44} {:<10} {}\n", path, type_name(root, prop), desc));

        let resolved = resolve(root, prop);
        match resolved["type"].as_str() {
            Some("object") => describe_object(root, resolved, &format!("{}.", path), out),
            Some("array") if resolve(root, &resolved["items"])["type"] == "object" => {
                describe_object(root, &resolved["items"], &format!("{}[].", path), out)
            }
            _ => {}
        }
    }
}
