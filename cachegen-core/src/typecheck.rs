//! Validation of `type` statements.
//!
//! A type statement names a family and passes a raw token per template
//! parameter. Checking it means binding each token against the family's
//! parameter table: integers and booleans resolve through the constant
//! table, type references must name an earlier declaration whose family
//! belongs to the slot's category. Nothing is committed here; the caller
//! decides whether to declare the returned descriptor.

use crate::context::Context;
use crate::error::CoreError;
use crate::types::{Category, Family, ParamKind, ParamSpec, ParamValue, TypeDescriptor};

/// Validates one `type NAME = FAMILY(ARGS);` statement.
pub fn check_type(
    ctx: &Context,
    name: &str,
    family: &str,
    args: &[String],
) -> Result<TypeDescriptor, CoreError> {
    let family =
        Family::from_name(family).ok_or_else(|| CoreError::UnknownFamily(family.to_string()))?;
    let specs = family.params();
    if args.len() != specs.len() {
        return Err(CoreError::ParameterArity {
            family: family.name(),
            expected: specs.len(),
            given: args.len(),
        });
    }

    let params = specs
        .iter()
        .zip(args)
        .map(|(spec, arg)| bind_param(ctx, family, spec, arg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypeDescriptor {
        name: name.to_string(),
        family,
        params,
        builtin: false,
    })
}

fn bind_param(
    ctx: &Context,
    family: Family,
    spec: &ParamSpec,
    arg: &str,
) -> Result<ParamValue, CoreError> {
    match spec.kind {
        ParamKind::Int => ctx.resolve_int(arg).map(ParamValue::Int),
        ParamKind::Bool => ctx.resolve_bool(arg).map(ParamValue::Bool),
        ParamKind::Type { category, optional } => {
            check_reference(ctx, family, spec.name, arg, category, optional)
                .map(ParamValue::TypeRef)
        }
    }
}

fn check_reference(
    ctx: &Context,
    family: Family,
    param: &'static str,
    arg: &str,
    category: Category,
    optional: bool,
) -> Result<Option<String>, CoreError> {
    let mismatch = |found: String| CoreError::CategoryMismatch {
        family: family.name(),
        param,
        value: arg.to_string(),
        category: category.name(),
        found,
    };

    if arg.is_empty() {
        return if optional {
            Ok(None)
        } else {
            Err(mismatch("an empty reference".to_string()))
        };
    }

    let referenced = ctx
        .lookup_type(arg)
        .ok_or_else(|| mismatch("an undeclared name".to_string()))?;
    if !category.admits(referenced.family) {
        return Err(mismatch(referenced.family.name().to_string()));
    }
    Ok(Some(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// A context holding one declaration of every referenceable family.
    fn populated() -> Context {
        let mut ctx = Context::new();
        let decls: &[(&str, &str, &[&str])] = &[
            ("meta", "MetadataMSI", &["48", "6", "12"]),
            ("data", "Data64B", &[]),
            ("idx", "IndexNorm", &["6", "6"]),
            ("rpc", "ReplaceLRU", &["6", "8"]),
            ("dly", "DelayL1", &["1", "2", "3"]),
            ("cache", "CacheNorm", &["6", "8", "meta", "data", "idx", "rpc", "dly", "false"]),
            ("outer", "OuterPortMSI", &["meta", "data"]),
            ("inner", "InnerPortMSIBroadcast", &["meta", "data", "true"]),
            ("core", "CoreInterfaceMSI", &["meta", "data", "false", "false"]),
        ];
        for (name, family, list) in decls {
            let desc = check_type(&ctx, name, family, &args(list)).expect("valid declaration");
            ctx.declare_type(desc).expect("unique");
        }
        ctx
    }

    /// Well-formed arguments for every family, against `populated()`.
    fn valid_args(family: Family) -> Vec<String> {
        let list: &[&str] = match family {
            Family::Data64B => &[],
            Family::MetadataMSI => &["48", "6", "12"],
            Family::CacheArrayNorm => &["6", "8", "meta", "data"],
            Family::CacheSkewed => &["10", "16", "2", "meta", "data", "idx", "rpc", "dly", "0"],
            Family::CacheNorm => &["6", "8", "meta", "data", "idx", "rpc", "dly", "1"],
            Family::OuterPortMSIUncached | Family::OuterPortMSI => &["meta", "data"],
            Family::InnerPortMSIUncached | Family::InnerPortMSIBroadcast => {
                &["meta", "data", "TRUE"]
            }
            Family::CoreInterfaceMSI => &["meta", "data", "true", "FALSE"],
            Family::CoherentCacheNorm => &["cache", "outer", "inner"],
            Family::CoherentL1CacheNorm => &["cache", "outer", "core"],
            Family::SimpleMemoryModel => &["data", "dly"],
            Family::IndexNorm | Family::IndexRandom => &["6", "6"],
            Family::IndexSkewed => &["10", "6", "2"],
            Family::ReplaceFIFO | Family::ReplaceLRU => &["6", "8"],
            Family::DelayL1 | Family::DelayCoherentCache => &["1", "2", "3"],
            Family::DelayMemory => &["100"],
        };
        args(list)
    }

    #[test]
    fn accepts_well_formed_arguments_for_every_family() {
        let ctx = populated();
        for family in Family::ALL {
            let desc = check_type(&ctx, "t", family.name(), &valid_args(family))
                .unwrap_or_else(|e| panic!("{family}: {e}"));
            assert_eq!(desc.family, family);
            assert_eq!(desc.params.len(), family.params().len());
        }
    }

    #[test]
    fn rejects_wrong_arity_for_every_family() {
        let ctx = populated();
        for family in Family::ALL {
            let mut too_many = valid_args(family);
            too_many.push("1".into());
            let err = check_type(&ctx, "t", family.name(), &too_many).unwrap_err();
            assert!(
                matches!(err, CoreError::ParameterArity { expected, given, .. }
                    if expected == family.params().len() && given == expected + 1),
                "{family}: {err}"
            );

            if let Some((_, fewer)) = valid_args(family).split_last() {
                let err = check_type(&ctx, "t", family.name(), fewer).unwrap_err();
                assert!(matches!(err, CoreError::ParameterArity { .. }), "{family}: {err}");
            }
        }
    }

    #[test]
    fn rejects_out_of_category_reference_for_every_slot() {
        let ctx = populated();
        for family in Family::ALL {
            for (pos, spec) in family.params().iter().enumerate() {
                let ParamKind::Type { category, .. } = spec.kind else {
                    continue;
                };
                // `rpc` is a replacement policy; use `idx` where that would fit.
                let wrong = if category == Category::ReplaceFunction { "idx" } else { "rpc" };
                let mut list = valid_args(family);
                list[pos] = wrong.to_string();
                let err = check_type(&ctx, "t", family.name(), &list).unwrap_err();
                assert!(
                    matches!(&err, CoreError::CategoryMismatch { param, .. } if *param == spec.name),
                    "{family}.{}: {err}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn optional_slots_accept_empty_reference() {
        let ctx = populated();
        for family in Family::ALL {
            for (pos, spec) in family.params().iter().enumerate() {
                let ParamKind::Type { optional, .. } = spec.kind else {
                    continue;
                };
                let mut list = valid_args(family);
                list[pos] = String::new();
                let result = check_type(&ctx, "t", family.name(), &list);
                if optional {
                    let desc = result.unwrap_or_else(|e| panic!("{family}: {e}"));
                    assert_eq!(desc.params[pos], ParamValue::TypeRef(None));
                } else {
                    assert!(matches!(result, Err(CoreError::CategoryMismatch { .. })));
                }
            }
        }
    }

    #[test]
    fn metadata_only_array_renders_void_data() {
        let ctx = populated();
        let desc = check_type(&ctx, "tags", "CacheArrayNorm", &args(&["6", "8", "meta", ""]))
            .expect("valid");
        assert_eq!(
            desc.alias_line().as_deref(),
            Some("typedef CacheArrayNorm<6,8,meta,void> tags;")
        );
    }

    #[test]
    fn rejects_undeclared_reference() {
        let ctx = populated();
        let err = check_type(&ctx, "p", "OuterPortMSI", &args(&["nometa", "data"])).unwrap_err();
        assert!(matches!(err, CoreError::CategoryMismatch { found, .. } if found == "an undeclared name"));
    }

    #[test]
    fn predefined_data_type_satisfies_data_slot() {
        let ctx = populated();
        check_type(&ctx, "p", "OuterPortMSI", &args(&["meta", "Data64B"])).expect("valid");
    }

    #[test]
    fn resolves_constants_and_bool_aliases() {
        let mut ctx = populated();
        ctx.declare_constant("L1IW", 6).unwrap();
        ctx.declare_constant("EnableMonitor", 0).unwrap();
        let desc = check_type(
            &ctx,
            "c",
            "CacheNorm",
            &args(&["L1IW", "8", "meta", "data", "idx", "rpc", "", "EnableMonitor"]),
        )
        .expect("valid");
        assert_eq!(desc.params[0], ParamValue::Int(6));
        assert_eq!(desc.params[7], ParamValue::Bool(false));

        for (token, expected) in [("true", true), ("TRUE", true), ("false", false), ("FALSE", false)] {
            let desc = check_type(&ctx, "i", "InnerPortMSIUncached", &args(&["meta", "data", token]))
                .expect("valid");
            assert_eq!(desc.params[2], ParamValue::Bool(expected));
        }
    }

    #[test]
    fn rejects_unknown_family_and_bad_integers() {
        let ctx = populated();
        let err = check_type(&ctx, "x", "CacheMagic", &[]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownFamily(name) if name == "CacheMagic"));

        let err = check_type(&ctx, "x", "IndexNorm", &args(&["six", "6"])).unwrap_err();
        assert!(matches!(err, CoreError::IntegerParse(token) if token == "six"));

        let err = check_type(&ctx, "x", "InnerPortMSIUncached", &args(&["meta", "data", "2"]))
            .unwrap_err();
        assert!(matches!(err, CoreError::BoolParse(_)));
    }
}
