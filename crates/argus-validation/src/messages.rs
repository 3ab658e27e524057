//! Diagnostic message codes emitted by the plugin
//!
//! Every diagnostic the plugin logs is keyed by a stable code and rendered from
//! a template with positional `{0}`, `{1}` placeholders. Codes start with the
//! level letter (`I`nfo, `D`ebug, `W`arn) followed by `AVB` and a sequence number.

/// Validation plugin registered with the host
pub const PLUGIN_REGISTERED: &str = "IAVB000001";
/// About to validate a flagged parameter
pub const VALIDATING: &str = "DAVB000001";
/// A flagged parameter passed validation
pub const VALIDATION_PASSED: &str = "DAVB000002";
/// A flagged parameter produced violations
pub const VIOLATIONS_FOUND: &str = "DAVB000003";
/// The carrier was injected into the method's arguments
pub const CARRIER_INJECTED: &str = "DAVB000004";
/// Violations escalated because the method has no carrier parameter
pub const VIOLATIONS_ESCALATED: &str = "WAVB000001";

const TEMPLATES: &[(&str, &str)] = &[
    (PLUGIN_REGISTERED, "Validation plugin registered with processor '{0}'."),
    (VALIDATING, "Validating parameter {0} ({1}) of {2}: {3}"),
    (VALIDATION_PASSED, "Parameter {0} of {1} passed validation."),
    (VIOLATIONS_FOUND, "Parameter {0} of {1} has {2} constraint violation(s)."),
    (VIOLATIONS_FOUND_UNCOUNTED, "Parameter {0} of {1} has constraint violations."),
    (CARRIER_INJECTED, "Injected {0} violation(s) into argument {1} of {2}."),
    (VIOLATIONS_ESCALATED, "{0} has no violations parameter; aborting with {1} violation(s)."),
];

/// Variant of [`VIOLATIONS_FOUND`] used when counts are not reported
const VIOLATIONS_FOUND_UNCOUNTED: &str = "DAVB000003#uncounted";

/// Template registered for a message code
pub fn template(code: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, template)| *template)
}

/// Render a message, substituting `{n}` with the n-th argument
///
/// Unknown codes render as the code followed by the arguments, so a missing
/// template never hides a diagnostic.
pub fn render(code: &str, args: &[&dyn std::fmt::Display]) -> String {
    let Some(template) = template(code) else {
        let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        return format!("{} {}", code, rendered.join(" ")).trim_end().to_string();
    };

    // Single pass so substituted text is never scanned for placeholders
    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|i| (i, close)))
            .and_then(|(i, close)| args.get(i).map(|arg| (arg, close)));

        match placeholder {
            Some((arg, close)) => {
                message.push_str(&arg.to_string());
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}

/// Render the post-validation message for a parameter with violations
pub fn render_violations_found(parameter: &str, method: &str, count: Option<usize>) -> String {
    match count {
        Some(count) => render(VIOLATIONS_FOUND, &[&parameter, &method, &count]),
        None => render(VIOLATIONS_FOUND_UNCOUNTED, &[&parameter, &method]),
    }
}
