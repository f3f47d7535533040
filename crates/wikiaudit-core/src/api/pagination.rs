//! `Link` header parsing for paginated REST listings.
//!
//! GitHub returns values such as
//! `<https://api.github.com/user/1/repos?page=2>; rel="next", <...>; rel="last"`.

/// Return the URL of the `rel="next"` entry, if any.
pub fn next_link(header: &str) -> Option<String> {
    link_with_rel(header, "next")
}

/// Return the URL of the first link whose `rel` contains `wanted`.
pub fn link_with_rel(header: &str, wanted: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let matches = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case(wanted))
        });

        matches.then(|| url.to_string())
    })
}
