// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types in the workspace: Display, Debug, Error trait,
//! Send + Sync + 'static bounds, and anyhow interop.

use std::error::Error;

// ── Helpers ──────────────────────────────────────────────────────────────

fn assert_send_sync_static<T: Send + Sync + 'static>() {}

fn assert_std_error<T: std::error::Error>() {}

/// Verify Display is non-empty and Debug is non-empty for a given error value.
fn check_display_debug(err: &dyn Error) {
    let display = err.to_string();
    assert!(!display.is_empty(), "Display must be non-empty");
    let debug = format!("{err:?}");
    assert!(!debug.is_empty(), "Debug must be non-empty");
}

/// Round-trip through anyhow::Error and back via downcast.
fn check_anyhow_roundtrip<E: Error + Send + Sync + 'static + Clone>(err: E) {
    let anyhow_err: anyhow::Error = anyhow::Error::new(err.clone());
    let display_before = err.to_string();
    assert_eq!(display_before, anyhow_err.to_string());
    let downcasted = anyhow_err
        .downcast_ref::<E>()
        .expect("downcast should succeed");
    assert_eq!(downcasted.to_string(), display_before);
}

// =========================================================================
// 1. AnomalyError (anomaly-model)
// =========================================================================
mod anomaly_error {
    use super::*;
    use anomaly_model::AnomalyError;

    #[test]
    fn trait_bounds() {
        assert_send_sync_static::<AnomalyError>();
        assert_std_error::<AnomalyError>();
    }

    #[test]
    fn every_variant_displays() {
        for err in [
            AnomalyError::NotObjectLike { kind: "string" },
            AnomalyError::PersistentMapUnavailable,
            AnomalyError::UnknownCategory {
                value: "Teapot".into(),
            },
        ] {
            check_display_debug(&err);
            check_anyhow_roundtrip(err);
        }
    }

    #[test]
    fn no_source_chain() {
        let err = AnomalyError::PersistentMapUnavailable;
        assert!(err.source().is_none());
    }
}

// =========================================================================
// 2. Anomaly as an error value
// =========================================================================
mod anomaly {
    use super::*;
    use anomaly_model::{Anomaly, Category, ReasonRegistry, Value, to_response};

    #[test]
    fn trait_bounds() {
        assert_send_sync_static::<Anomaly>();
        assert_std_error::<Anomaly>();
    }

    #[test]
    fn anomaly_travels_through_anyhow() {
        let anomaly = Anomaly::new(Category::Forbidden).with_message("admins only");
        check_display_debug(&anomaly);
        check_anyhow_roundtrip(anomaly);
    }

    #[test]
    fn handler_error_becomes_response() {
        fn handler() -> anyhow::Result<()> {
            Err(Anomaly::new(Category::Conflict)
                .with_message("already exists")
                .into())
        }

        let err = handler().unwrap_err();
        let value = match err.downcast_ref::<Anomaly>() {
            Some(anomaly) => Value::from(anomaly.clone()),
            None => Value::from_error(&*err),
        };
        let resp = to_response(&value, &ReasonRegistry::new());
        assert_eq!(resp.status_code, 409);
        assert!(resp.body.contains("already exists"));
    }
}

// =========================================================================
// 3. ConfigError (anomaly-config)
// =========================================================================
mod config_error {
    use super::*;
    use anomaly_config::ConfigError;

    #[test]
    fn trait_bounds() {
        assert_send_sync_static::<ConfigError>();
        assert_std_error::<ConfigError>();
    }

    #[test]
    fn parse_error_display() {
        let err = anomaly_config::parse_toml("[reasons\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        check_display_debug(&err);
    }
}
