//! Instruction prompt construction.
//!
//! The prompt is a fixed list of formatting directives followed by the
//! caller's code, verbatim. Two directives depend on [`FormatOptions`].

use crate::{FormatOptions, ScriptContext};

const TASK_DIRECTIVE: &str = "Format the following Lua (Luau) code for Roblox Studio. \
Keep its behavior exactly the same: do not rename, add or remove any logic.";

const INDENT_DIRECTIVE: &str =
    "Indent with 4 spaces per nesting level, never tabs, and keep spacing around operators consistent.";

const ORDERING_DIRECTIVE: &str = "Organize the script in this order: service lookups \
(game:GetService) first, then required modules, then constants, then variables, then \
functions, and finally the main logic and event connections.";

const ALWAYS_PARENTHESES_DIRECTIVE: &str = "Always wrap the conditions of if, elseif and \
while statements in parentheses, for example: 'if (condition) then'.";

const MINIMAL_PARENTHESES_DIRECTIVE: &str = "Only wrap conditions of if, elseif and while \
statements in parentheses when precedence or clarity requires it.";

const AND_OR_DIRECTIVE: &str = "For conditional assignment, prefer the 'x = condition and a \
or b' idiom only when 'a' can never be false or nil; otherwise use an explicit if statement.";

const COMMENT_DIRECTIVE: &str = "Do not add any comments.";

const OUTPUT_DIRECTIVE: &str = "Reply with the formatted code only: no explanations, no \
markdown, no backticks (```) and no language tag. PLAIN TEXT ONLY.";

/// Parenthesization rule selected by `use_always_parentheses`.
pub fn parentheses_directive(use_always_parentheses: bool) -> &'static str {
    if use_always_parentheses {
        ALWAYS_PARENTHESES_DIRECTIVE
    } else {
        MINIMAL_PARENTHESES_DIRECTIVE
    }
}

/// Ternary-idiom rule, present only when `prefer_and_or_idiom` is set.
pub fn and_or_directive(prefer_and_or_idiom: bool) -> Option<&'static str> {
    prefer_and_or_idiom.then_some(AND_OR_DIRECTIVE)
}

/// Build the instruction prompt for `code`.
///
/// Pure and deterministic. The code is appended after a blank line exactly as
/// given.
///
/// # Examples
///
/// ```
/// use luafmt_core::{FormatOptions, ScriptContext, build_prompt};
///
/// let prompt = build_prompt("print(1)", Some(ScriptContext::Script), &FormatOptions::default());
/// assert!(prompt.ends_with("\n\nprint(1)"));
/// assert!(prompt.contains("'if (condition) then'"));
/// ```
pub fn build_prompt(code: &str, context: Option<ScriptContext>, options: &FormatOptions) -> String {
    let mut directives: Vec<String> = vec![TASK_DIRECTIVE.to_string()];

    if let Some(context) = context {
        directives.push(format!(
            "The code is a {}: {}.",
            context,
            context.description()
        ));
    }

    directives.push(INDENT_DIRECTIVE.to_string());
    directives.push(ORDERING_DIRECTIVE.to_string());
    directives.push(parentheses_directive(options.use_always_parentheses).to_string());
    if let Some(directive) = and_or_directive(options.prefer_and_or_idiom) {
        directives.push(directive.to_string());
    }
    directives.push(COMMENT_DIRECTIVE.to_string());
    directives.push(OUTPUT_DIRECTIVE.to_string());

    format!("{}\n\n{}", directives.join("\n"), code)
}
