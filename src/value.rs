// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::host::HostObject;
use crate::number::Number;
use crate::script::{ScriptObject, ScriptValue};

use core::any::TypeId;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Members of a mapping-like value, keyed by member name.
pub type Map = BTreeMap<Rc<str>, Value>;

/// Runtime value flowing through an evaluation.
///
/// Containers are reference counted: cloning a value never copies an object, and a
/// member written through one alias is visible through all of them.
#[derive(Clone)]
pub enum Value {
    // Json data types. serde will automatically map json to these variants.
    Null,
    Bool(bool),
    Number(Number),
    String(Rc<str>),
    Array(Rc<Vec<Value>>),
    Object(Rc<RefCell<Map>>),

    // Values supplied by the host.
    Host(Rc<dyn HostObject>),
    Script(Rc<dyn ScriptValue>),
}

/// Runtime shape of a value, used to pick and cache member accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Host(TypeId),
    Script(TypeId),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Object(m) => match m.try_borrow() {
                Ok(m) => f.debug_tuple("Object").field(&*m).finish(),
                Err(_) => f.write_str("Object(<borrowed>)"),
            },
            Value::Host(h) => f.debug_tuple("Host").field(h).finish(),
            Value::Script(s) => f.debug_tuple("Script").field(s).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                match (a.try_borrow(), b.try_borrow()) {
                    (Ok(a), Ok(b)) => *a == *b,
                    // A map being modified is only equal to itself.
                    _ => false,
                }
            }
            // Host and script values have identity semantics.
            (Value::Host(a), Value::Host(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            (Value::Script(a), Value::Script(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error;
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s.as_ref()),
            Value::Number(n) => n.serialize(serializer),
            Value::Array(a) => a.serialize(serializer),
            Value::Object(fields) => {
                let fields = fields
                    .try_borrow()
                    .map_err(|_| Error::custom("object is being modified"))?;
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields.iter() {
                    map.serialize_entry(k.as_ref(), v)?;
                }
                map.end()
            }

            // Host objects are written as their readable members.
            Value::Host(host) => {
                let members = host.members();
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for member in members {
                    let value = host.get_member(&member.name).map_err(Error::custom)?;
                    map.serialize_entry(member.name.as_ref(), &value)?;
                }
                map.end()
            }

            Value::Script(script) => match script.snapshot() {
                Some(fields) => fields.serialize(serializer),
                None => serializer.serialize_str(&format!("<{}>", script.type_name())),
            },
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a value")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(v))
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s.into()))
    }

    fn visit_string<E>(self, s: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(s.into()))
    }

    fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut arr = vec![];
        while let Some(v) = visitor.next_element()? {
            arr.push(v);
        }
        Ok(Value::from(arr))
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut map = Map::new();
        while let Some((key, value)) = visitor.next_entry::<String, Value>()? {
            map.insert(key.into(), value);
        }
        Ok(Value::from(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{s}"),
            // Unreadable hosts, objects being modified and cycles.
            Err(_e) => write!(f, "<{}>", self.kind_name()),
        }
    }
}

impl Value {
    pub fn new_object() -> Value {
        Value::from(Map::new())
    }

    pub fn new_array() -> Value {
        Value::from(vec![])
    }

    pub fn from_host<H: HostObject + 'static>(host: H) -> Value {
        Value::Host(Rc::new(host))
    }

    pub fn from_script<S: ScriptValue + 'static>(script: S) -> Value {
        Value::Script(Rc::new(script))
    }

    pub fn from_json_str(json: &str) -> Result<Value> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_str(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Value> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(Rc::new(a))
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Object(Rc::new(RefCell::new(m)))
    }
}

impl From<ScriptObject> for Value {
    fn from(s: ScriptObject) -> Self {
        Value::from_script(s)
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strings, numbers and booleans have no addressable members.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Host(_) => "host",
            Value::Script(_) => "script",
        }
    }

    pub fn type_key(&self) -> TypeKey {
        match self {
            Value::Null => TypeKey::Null,
            Value::Bool(_) => TypeKey::Bool,
            Value::Number(_) => TypeKey::Number,
            Value::String(_) => TypeKey::String,
            Value::Array(_) => TypeKey::Array,
            Value::Object(_) => TypeKey::Object,
            Value::Host(h) => TypeKey::Host(h.as_any().type_id()),
            Value::Script(s) => TypeKey::Script(s.as_any().type_id()),
        }
    }

    /// Text used when the value is quoted in a diagnostic. Strings are not re-quoted.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::String(s) => s.to_string(),
            Value::Host(h) => format!("<{}>", h.type_name()),
            Value::Script(s) => format!("<{}>", s.type_name()),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => match serde_json::to_string(self) {
                Ok(s) => s,
                Err(_) => format!("<{}>", self.kind_name()),
            },
        }
    }

    pub fn as_bool(&self) -> Result<&bool> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(anyhow!("not a bool")),
        }
    }

    pub fn as_string(&self) -> Result<&Rc<str>> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(anyhow!("not a string")),
        }
    }

    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            _ => Err(anyhow!("not a number")),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(anyhow!("not an array")),
        }
    }

    pub fn as_object(&self) -> Result<Ref<'_, Map>> {
        match self {
            Value::Object(m) => match m.try_borrow() {
                Ok(m) => Ok(m),
                Err(_) => bail!("object is being modified"),
            },
            _ => Err(anyhow!("not an object")),
        }
    }

    pub fn as_object_mut(&self) -> Result<RefMut<'_, Map>> {
        match self {
            Value::Object(m) => match m.try_borrow_mut() {
                Ok(m) => Ok(m),
                Err(_) => bail!("object is already borrowed"),
            },
            _ => Err(anyhow!("not an object")),
        }
    }

    pub fn as_host(&self) -> Result<&Rc<dyn HostObject>> {
        match self {
            Value::Host(h) => Ok(h),
            _ => Err(anyhow!("not a host object")),
        }
    }

    pub fn as_script(&self) -> Result<&Rc<dyn ScriptValue>> {
        match self {
            Value::Script(s) => Ok(s),
            _ => Err(anyhow!("not a script value")),
        }
    }
}
