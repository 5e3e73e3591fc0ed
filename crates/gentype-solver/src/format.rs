//! Human-readable rendering of descriptors and values.

use std::fmt::Write;

use crate::hierarchy::TypeHost;
use crate::types::{Origin, TypeArg, TypeDesc};
use crate::value::Value;

/// Formats descriptors and values using the host's type names.
///
/// Output follows the subscript notation the syntax crate parses, so a
/// formatted descriptor can be fed back through the parser.
#[derive(Clone, Copy)]
pub struct TypeFormatter<'a> {
    host: &'a dyn TypeHost,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(host: &'a dyn TypeHost) -> Self {
        Self { host }
    }

    pub fn format(&self, ty: &TypeDesc) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    pub fn format_arg(&self, arg: &TypeArg) -> String {
        let mut out = String::new();
        self.write_arg(&mut out, arg);
        out
    }

    /// Formats `origin[args...]` without building a descriptor.
    pub fn format_parts(&self, origin: Origin, args: &[TypeArg]) -> String {
        let mut out = String::new();
        self.write_parts(&mut out, origin, args);
        out
    }

    pub fn format_origin(&self, origin: Origin) -> String {
        match origin {
            Origin::Union => "Union".to_owned(),
            Origin::Literal => "Literal".to_owned(),
            other => match other.plain_type() {
                Some(ty) => self.host.type_name(ty),
                None => format!("{other:?}"),
            },
        }
    }

    pub fn format_value(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value);
        out
    }

    fn write_type(&self, out: &mut String, ty: &TypeDesc) {
        match ty {
            TypeDesc::Plain(id) => out.push_str(&self.host.type_name(*id)),
            TypeDesc::Generic(generic) => self.write_parts(out, generic.origin, &generic.args),
        }
    }

    fn write_parts(&self, out: &mut String, origin: Origin, args: &[TypeArg]) {
        out.push_str(&self.format_origin(origin));
        if args.is_empty() {
            return;
        }
        out.push('[');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_arg(out, arg);
        }
        out.push(']');
    }

    fn write_arg(&self, out: &mut String, arg: &TypeArg) {
        match arg {
            TypeArg::Type(ty) => self.write_type(out, ty),
            TypeArg::Value(value) => self.write_value(out, value),
            TypeArg::Ellipsis => out.push_str("..."),
        }
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(x) => {
                let _ = write!(out, "{x:?}");
            }
            Value::Str(text) => write_quoted(out, text),
            Value::List(items) => {
                out.push('[');
                self.write_items(out, items);
                out.push(']');
            }
            Value::Tuple(items) => {
                out.push('(');
                self.write_items(out, items);
                if items.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Value::Dict(entries) => {
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, key);
                    out.push_str(": ");
                    self.write_value(out, item);
                }
                out.push('}');
            }
            Value::Object(object) => {
                out.push_str(&self.host.type_name(object.class));
                out.push('(');
                let mut first = true;
                if let Some(items) = &object.items {
                    out.push('[');
                    self.write_items(out, items);
                    out.push(']');
                    first = false;
                }
                for (name, field) in &object.fields {
                    if !first {
                        out.push_str(", ");
                    }
                    first = false;
                    out.push_str(name);
                    out.push('=');
                    self.write_value(out, field);
                }
                out.push(')');
            }
        }
    }

    fn write_items(&self, out: &mut String, items: &[Value]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_value(out, item);
        }
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
