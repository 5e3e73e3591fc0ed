//! Runs one relation query from parsed CLI arguments.

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::cli::args::{ClassDecl, CliArgs, Command};
use crate::solver::{
    ClassHierarchy, RelationContext, RelationKind, RelationPolicy, RelationQuery, RuleRegistry,
    TypeFormatter, Value, query_relation,
};
use crate::syntax::{parse_type, parse_value};

/// Outcome of one query, with both sides in canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationOutcome {
    pub relation: RelationKind,
    pub subject: String,
    pub target: String,
    pub holds: bool,
}

/// Declare `classes` in order on top of the builtin lattice.
pub fn build_hierarchy(classes: &[ClassDecl]) -> Result<ClassHierarchy> {
    let hierarchy = ClassHierarchy::new();
    for decl in classes {
        let mut bases = Vec::with_capacity(decl.bases.len());
        for base in &decl.bases {
            let Some(id) = hierarchy.lookup(base) else {
                bail!("unknown base class `{base}` for `{}`", decl.name);
            };
            bases.push(id);
        }
        hierarchy
            .define_class(&decl.name, &bases)
            .with_context(|| format!("failed to declare class `{}`", decl.name))?;
    }
    Ok(hierarchy)
}

pub fn run(args: &CliArgs) -> Result<RelationOutcome> {
    let hierarchy = build_hierarchy(&args.classes)?;
    let formatter = TypeFormatter::new(&hierarchy);
    let context = RelationContext::new(&hierarchy, RuleRegistry::global());
    let policy = RelationPolicy::default();

    match &args.command {
        Command::Check {
            value,
            ty,
            json_value,
        } => {
            let parsed_value = if *json_value {
                let json: serde_json::Value = serde_json::from_str(value)
                    .with_context(|| format!("invalid JSON value `{value}`"))?;
                value_from_json(&json)
            } else {
                parse_value(value, &hierarchy)
                    .with_context(|| format!("failed to parse value `{value}`"))?
            };
            let parsed_ty =
                parse_type(ty, &hierarchy).with_context(|| format!("failed to parse type `{ty}`"))?;
            debug!(value = %value, ty = %ty, "check");

            let query = RelationQuery::Instance {
                value: &parsed_value,
                ty: &parsed_ty,
            };
            let holds = query_relation(query, policy, context)?;
            Ok(RelationOutcome {
                relation: RelationKind::Instance,
                subject: formatter.format_value(&parsed_value),
                target: formatter.format(&parsed_ty),
                holds,
            })
        }
        Command::Subtype { sub, sup } => {
            let parsed_sub =
                parse_type(sub, &hierarchy).with_context(|| format!("failed to parse type `{sub}`"))?;
            let parsed_sup =
                parse_type(sup, &hierarchy).with_context(|| format!("failed to parse type `{sup}`"))?;
            debug!(sub = %sub, sup = %sup, "subtype");

            let query = RelationQuery::Subtype {
                sub: &parsed_sub,
                sup: &parsed_sup,
            };
            let holds = query_relation(query, policy, context)?;
            Ok(RelationOutcome {
                relation: RelationKind::Subtype,
                subject: formatter.format(&parsed_sub),
                target: formatter.format(&parsed_sup),
                holds,
            })
        }
    }
}

/// JSON has no tuples or objects with a class, so arrays become lists and
/// objects become string-keyed dicts. Integers outside `i64` become floats.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(flag) => Value::Bool(*flag),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(n) => Value::Int(n),
            None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(text) => Value::str(text.as_str()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(value_from_json).collect()),
        serde_json::Value::Object(entries) => Value::Dict(
            entries
                .iter()
                .map(|(key, item)| (Value::str(key.as_str()), value_from_json(item)))
                .collect(),
        ),
    }
}
