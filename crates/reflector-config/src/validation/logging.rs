//! Logging section validation.

use tracing_subscriber::filter::Directive;

use crate::schema::ReflectorConfig;

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &ReflectorConfig) {
    for directive in &config.logging.directives {
        if directive.parse::<Directive>().is_err() {
            errors.push(format!("logging.directives: invalid directive {directive:?}"));
        }
    }
}
