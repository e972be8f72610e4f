// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use core::any::Any;
use core::cell::RefCell;
use std::env;
use std::rc::Rc;

use anyhow::{bail, Result};
use dotaccess::unstable::parse_path;
use dotaccess::*;
use serde::{Deserialize, Deserializer};
use test_generator::test_resources;

/// Host type used by the `record!` encoding: writable `Name` and `Tags`, read-only `Id`.
#[derive(Debug)]
struct Record {
    name: RefCell<Value>,
    id: Value,
    tags: RefCell<Value>,
}

impl HostObject for Record {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &str {
        "Record"
    }

    fn members(&self) -> Vec<HostMember> {
        vec![
            HostMember::writable("Name"),
            HostMember::readonly("Id"),
            HostMember::writable("Tags"),
        ]
    }

    fn get_member(&self, name: &str) -> Result<Value> {
        Ok(match name {
            "Name" => self.name.borrow().clone(),
            "Id" => self.id.clone(),
            "Tags" => self.tags.borrow().clone(),
            _ => bail!("Record has no member {name}"),
        })
    }

    fn set_member(&self, name: &str, value: Value) -> Result<()> {
        match name {
            "Name" => *self.name.borrow_mut() = value,
            "Tags" => *self.tags.borrow_mut() = value,
            _ => bail!("Record member {name} cannot be written"),
        }
        Ok(())
    }
}

fn field(fields: &Map, name: &str) -> Result<Value> {
    match fields.get(name) {
        Some(v) => process_value(v),
        None => Ok(Value::Null),
    }
}

// Process test value specified in yaml to interpret special encodings.
fn process_value(v: &Value) -> Result<Value> {
    match v {
        Value::Object(_) => {
            let fields = v.as_object()?;

            // Handle script objects:
            // script! :
            //   members: { ... }
            //   readonly: [ member names ]
            //   frozen: true
            if let (1, Some(desc)) = (fields.len(), fields.get("script!")) {
                let desc = desc.as_object()?;
                let obj = ScriptObject::new();
                if let Some(members) = desc.get("members") {
                    for (name, value) in members.as_object()?.iter() {
                        obj.set(name, process_value(value)?);
                    }
                }
                if let Some(readonly) = desc.get("readonly") {
                    for name in readonly.as_array()? {
                        if !obj.set_member_readonly(name.as_string()?, true) {
                            bail!("readonly member {name} is not defined");
                        }
                    }
                }
                if let Some(frozen) = desc.get("frozen") {
                    obj.set_readonly(*frozen.as_bool()?);
                }
                return Ok(Value::from(obj));
            }

            // Handle host records:
            // record! : { Name: ..., Id: ..., Tags: ... }
            if let (1, Some(desc)) = (fields.len(), fields.get("record!")) {
                let desc = desc.as_object()?;
                return Ok(Value::from_host(Record {
                    name: RefCell::new(field(&desc, "Name")?),
                    id: field(&desc, "Id")?,
                    tags: RefCell::new(field(&desc, "Tags")?),
                }));
            }

            // Recursively process objects
            let mut map = Map::new();
            for (key, value) in fields.iter() {
                map.insert(key.clone(), process_value(value)?);
            }
            Ok(Value::from(map))
        }

        // Recursively process arrays
        Value::Array(items) => Ok(Value::from(
            items
                .iter()
                .map(process_value)
                .collect::<Result<Vec<_>>>()?,
        )),

        // Simple variants
        _ => Ok(v.clone()),
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Assignment {
    target: String,
    value: Value,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TestCase {
    note: String,
    data: Option<Value>,
    #[serde(default)]
    options: ContextOptions,
    // Members the fallback hook supplies, by member name.
    fallback: Option<Value>,
    lowercase_members: Option<bool>,
    #[serde(default)]
    assign: Vec<Assignment>,
    expr: Option<String>,
    #[serde(default, deserialize_with = "present")]
    want_result: Option<Value>,
    error: Option<String>,
    skip: Option<bool>,
}

// `want_result: null` expects a null result rather than no result.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn prepare(case: &TestCase) -> Result<Context> {
    let mut ctx = Context::with_options(case.options.clone());

    if let Some(data) = &case.data {
        for (name, value) in data.as_object()?.iter() {
            ctx.set_global(name, process_value(value)?);
        }
    }

    if let Some(fallback) = &case.fallback {
        let fallback = process_value(fallback)?;
        ctx.set_try_get_member(move |_, _, _, member| {
            Ok(fallback.as_object()?.get(member).cloned())
        });
    }

    if case.lowercase_members == Some(true) {
        ctx.set_member_renamer(|name| name.to_lowercase().into());
    }

    Ok(ctx)
}

fn eval(ctx: &mut Context, case: &TestCase) -> Result<Value> {
    for assignment in &case.assign {
        let target = parse_path("<assign>", &assignment.target)?;
        ctx.set_value(&target, process_value(&assignment.value)?)?;
    }

    match &case.expr {
        Some(expr) => ctx.get_value(&parse_path("<expr>", expr)?),
        None => Ok(Value::Null),
    }
}

fn check_result(computed: &Value, expected: &Value) -> Result<()> {
    // Host and script values are compared through their serialized members.
    let c = serde_json::to_value(computed)?;
    let e = serde_json::to_value(expected)?;
    if c != e {
        bail!(
            "value mismatch:\nleft  = {}\nright = {}\n",
            serde_json::to_string_pretty(&c)?,
            serde_json::to_string_pretty(&e)?
        );
    }
    Ok(())
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        if case.skip == Some(true) {
            println!("skipped");
            continue;
        }

        match (&case.want_result, &case.error) {
            (Some(_), None) | (None, Some(_)) => (),
            _ => panic!("either want_result or error must be specified in test case."),
        }

        let mut ctx = prepare(&case)?;
        match eval(&mut ctx, &case) {
            Ok(computed) => match &case.want_result {
                Some(expected) => check_result(&computed, &process_value(expected)?)?,
                _ => bail!("eval succeeded and did not produce any errors"),
            },
            Err(actual) => match &case.error {
                Some(expected) => {
                    let actual = actual.to_string();
                    if !actual.contains(expected) {
                        bail!(
                            "Error message\n`{}\n`\ndoes not contain `{}`",
                            actual,
                            expected
                        );
                    }
                    println!("{actual}");
                }
                _ => return Err(actual),
            },
        }

        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test]
#[ignore = "run a single case file passed on the command line"]
fn one_yaml() -> Result<()> {
    let Some(file) = env::args().find(|a| a.ends_with(".yaml")) else {
        bail!("missing <yaml-file>");
    };
    yaml_test(&file)
}

#[test_resources("tests/member/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}

#[test]
fn shared_records_observe_writes() -> Result<()> {
    let record = Rc::new(Record {
        name: RefCell::new(Value::from("ada")),
        id: Value::from(1),
        tags: RefCell::new(Value::new_array()),
    });
    let mut ctx = Context::new();
    ctx.set_global("a", Value::Host(record.clone()));
    ctx.set_global("b", Value::Host(record.clone()));

    ctx.set_value(&parse_path("<t>", "a.Name")?, Value::from("grace"))?;
    assert_eq!(ctx.get_value(&parse_path("<t>", "b.Name")?)?, Value::from("grace"));
    assert_eq!(*record.name.borrow(), Value::from("grace"));
    Ok(())
}
