//! Type-safe logging macros using Code types with Display support
//!
//! Context values are any `Display` type: `"key" => value`.

/// Log error with Code type
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, position = $position:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($position), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, position = $position:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($position), context_refs)
        }
    };
}

/// Log success with Code type
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// Log warning message, optionally with a code and source position
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        $crate::logging::log_warning_with_context(None, $message, None, vec![])
    };

    (code = $code:expr, $message:expr, position = $position:expr) => {
        $crate::logging::log_warning_with_context(Some($code), $message, Some($position), vec![])
    };

    (code = $code:expr, $message:expr, position = $position:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context(
                Some($code), $message, Some($position), context_refs)
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context(None, $message, None, context_refs)
        }
    };
}

/// Log debug message; skips formatting entirely below debug level
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_debug_with_context($message, vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, context_refs)
        }
    };
}

/// Log performance metrics with standard format
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.2}", $duration.as_secs_f64() * 1000.0)
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.2}", $duration.as_secs_f64() * 1000.0),
            $($key => $value),+
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::tokens::Position;

    #[test]
    fn test_macro_forms_expand() {
        let count: usize = 3;
        let duration = std::time::Duration::from_millis(5);
        let position = Position::new(2, 4);

        log_error!(codes::syntax::UNEXPECTED_TOKEN, "Unexpected token");
        log_error!(codes::syntax::UNEXPECTED_TOKEN, "Unexpected token", position = position);
        log_error!(codes::syntax::UNEXPECTED_TOKEN, "Unexpected token",
            position = position,
            "expected" => "CLOSE_PAREN"
        );
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenized", "tokens" => count);
        log_info!("Processing", "lines" => count, "large" => false);
        log_warning!("Something odd");
        log_warning!(code = codes::lexical::ILLEGAL_CHARACTER, "Illegal character",
            position = position,
            "char" => '$'
        );
        log_debug!("Debug detail", "count" => count);
        log_performance!(codes::success::PIPELINE_COMPLETE, "Done",
            duration = duration,
            "tokens" => count
        );
    }
}
