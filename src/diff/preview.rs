use similar::TextDiff;

/// Default number of unchanged lines shown around each hunk
pub const DEFAULT_CONTEXT: usize = 3;

/// Render a unified diff between the current and the spliced content
pub fn unified_diff(old: &str, new: &str, path: &str, context: usize) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(context)
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}
