use crate::domain::DEFAULT_NAME;

/// Name to greet, taken from the first positional argument.
///
/// `args` is the full process argument list, program name first. Anything
/// after the first positional argument is ignored.
pub fn greeted_name<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    // ---
    args.into_iter()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}
