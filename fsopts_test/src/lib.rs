//! Test helpers for config builders.
//!
//! Allows for unified testing to make sure all builders follow the same
//! conventions and report failures the same way.

use std::collections::HashSet;

use fsopts::{
    BuilderRegistry, ConfigArg, DelegatingOptionsBuilder, DynConfigBuilder, ErrorKind,
    FileSystemOptions, ObjectRef, OptionInfo, Shape, TypeRef, setter_name,
};
use pretty_assertions::assert_eq;

/// An argument of the given shape that no real option accepts as valid.
fn sample_arg(shape: Shape) -> ConfigArg {
    match shape {
        Shape::Text => ConfigArg::Text("sample".to_string()),
        Shape::Texts => ConfigArg::Texts(vec!["sample".to_string()]),
        Shape::Type => ConfigArg::Type(TypeRef::of::<SampleValue>()),
        Shape::Object => ConfigArg::Object(ObjectRef::new(SampleValue)),
    }
}

#[derive(Default)]
struct SampleValue;

const SHAPES: [Shape; 4] = [Shape::Text, Shape::Texts, Shape::Type, Shape::Object];

/// Check the option table conventions of a builder.
///
/// * every option has entries, and the setter names follow the
///   `set<OptionName>` convention
/// * no two entries share setter, shape and parameter type
/// * unknown options and unsupported shapes fail with `NoSuchOption`
/// * failed calls leave the options bag untouched
pub fn test_builder_conformance(scheme: &str, builder: DynConfigBuilder) {
    let infos = builder.describe();
    assert!(!infos.is_empty(), "{scheme}: builder declares no options");

    let mut seen = HashSet::new();
    for info in &infos {
        assert!(!info.option.is_empty(), "{scheme}: empty option name");
        assert_eq!(
            info.setter,
            setter_name(&info.option),
            "{scheme}: setter name of option '{}'",
            info.option
        );
        let key = (info.setter.clone(), info.shape, info.param.to_string());
        assert!(
            seen.insert(key),
            "{scheme}: duplicate entry for option '{}' ({})",
            info.option,
            info.shape
        );
    }

    let registry = BuilderRegistry::builder()
        .with_builder(scheme, builder)
        .build();
    let delegate = DelegatingOptionsBuilder::new(registry);
    let mut opts = FileSystemOptions::new();

    for shape in SHAPES {
        let err = delegate
            .set_config(&mut opts, scheme, "noSuchOptionForSure", sample_arg(shape))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSuchOption, "{scheme}: {err}");
    }

    for info in &infos {
        for shape in SHAPES {
            if accepts(&infos, &info.setter, shape) {
                continue;
            }
            let err = delegate
                .set_config(&mut opts, scheme, &info.option, sample_arg(shape))
                .unwrap_err();
            assert_eq!(
                err.kind(),
                ErrorKind::NoSuchOption,
                "{scheme}: option '{}' must reject a {shape}",
                info.option
            );
        }
    }

    assert!(opts.is_empty(), "{scheme}: failed calls modified the bag");
}

fn accepts(infos: &[OptionInfo], setter: &str, shape: Shape) -> bool {
    infos.iter().any(|i| i.setter == setter && i.shape == shape)
}

/// Check that objects and types without the required capability are
/// rejected with `InvalidValue` by every object and class option.
pub fn test_rejects_foreign_objects(scheme: &str, builder: DynConfigBuilder) {
    let infos = builder.describe();
    let registry = BuilderRegistry::builder()
        .with_builder(scheme, builder)
        .build();
    let delegate = DelegatingOptionsBuilder::new(registry);
    let mut opts = FileSystemOptions::new();

    for info in infos
        .iter()
        .filter(|i| matches!(i.shape, Shape::Type | Shape::Object))
    {
        let err = delegate
            .set_config(&mut opts, scheme, &info.option, sample_arg(info.shape))
            .unwrap_err();
        assert_eq!(
            err.code(),
            "config-value-invalid",
            "{scheme}: option '{}' accepted a foreign {}",
            info.option,
            info.shape
        );
    }
    assert!(opts.is_empty(), "{scheme}: failed calls modified the bag");
}
