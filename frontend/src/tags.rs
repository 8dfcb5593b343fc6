/// Splits a comma-joined tag field, trimming and dropping empty pieces.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tags across `fields`, in first-seen order.
pub fn distinct_tags<'a>(fields: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for field in fields {
        for tag in split_tags(field) {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
    }
    seen
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_tags_trim_and_dedupe() {
        assert_eq!(distinct_tags(["work, home ,work"]), vec!["work", "home"]);
    }

    #[test]
    fn distinct_tags_span_fields() {
        let tags = distinct_tags(["gym", "", "work,gym", " , food"]);
        assert_eq!(tags, vec!["gym", "work", "food"]);
    }

    #[test]
    fn join_round_trips_through_split() {
        let tags = vec!["work".to_string(), "home".to_string()];
        assert_eq!(split_tags(&join_tags(&tags)), tags);
    }
}
