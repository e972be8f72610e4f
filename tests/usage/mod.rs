// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use dotaccess::unstable::parse_path;
use dotaccess::*;

#[test]
fn relaxed_template_reads() -> Result<()> {
    let options = ContextOptions::from_json_str(r#"{ "relaxed_member_access": true }"#)?;
    let mut ctx = Context::with_options(options);
    ctx.set_global("user", Value::from_json_str(r#"{ "name": "ada" }"#)?);

    let name = ctx.get_value(&parse_path("template.txt", "user.name")?)?;
    assert_eq!(name, Value::from("ada"));

    let city = ctx.get_value(&parse_path("template.txt", "user.address.city")?)?;
    assert_eq!(city, Value::Null);

    ctx.set_value(&parse_path("template.txt", "user.age")?, Value::from(36))?;
    assert_eq!(
        ctx.get_global("user").map(|u| u.to_string()),
        Some(r#"{"age":36,"name":"ada"}"#.to_string())
    );
    Ok(())
}

#[test]
fn strict_errors_render_source_location() -> Result<()> {
    let mut ctx = Context::new();
    ctx.set_global("user", Value::from_json_str(r#"{ "name": "ada" }"#)?);

    let expr = parse_path("template.txt", "user.address.city")?;
    let err = match ctx.get_value(&expr) {
        Ok(v) => panic!("expected an error, got {v}"),
        Err(e) => e,
    };
    let Some(runtime) = err.downcast_ref::<RuntimeError>() else {
        panic!("expected a runtime error, got {err}");
    };
    assert_eq!(runtime.file, "template.txt");
    assert_eq!(
        runtime.kind(),
        &RuntimeErrorKind::NullTarget {
            target: "user.address".to_string(),
            path: "user.address.city".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "\n--> template.txt:1:1\n  |\n1 | user.address.city\n  | ^\nerror: Object `user.address` is null. Cannot access member: user.address.city"
    );
    Ok(())
}
