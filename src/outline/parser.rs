use super::Item;

const COMMENT_MARKER: &str = " # ";

/// Split `text` into items, one per non-blank line, in source order.
pub fn parse_items(text: &str) -> Vec<Item> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

pub fn parse_line(line: &str) -> Item {
    let content = line.trim_start();
    let indent = line.chars().count() - content.chars().count();
    let content = content.trim_end();

    match content.split_once(COMMENT_MARKER) {
        Some((name, comment)) => Item::new(name.trim(), indent).with_comment(comment.trim()),
        None => Item::new(content, indent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tabs_and_spaces_as_single_units() {
        assert_eq!(parse_line("\t  file.txt").indent, 3);
        assert_eq!(parse_line("file.txt").indent, 0);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let item = parse_line("   src/    ");
        assert_eq!(item.name, "src/");
        assert_eq!(item.indent, 3);
        assert_eq!(item.comment, None);
    }

    #[test]
    fn splits_comment_at_first_marker() {
        let item = parse_line("  file.txt # hello # world");
        assert_eq!(item.name, "file.txt");
        assert_eq!(item.comment.as_deref(), Some("hello # world"));
    }

    #[test]
    fn hash_without_surrounding_spaces_is_part_of_the_name() {
        assert_eq!(parse_line("a#b").name, "a#b");
        assert_eq!(parse_line("# heading").name, "# heading");
        assert_eq!(parse_line("name #").comment, None);
    }

    #[test]
    fn handles_crlf_terminators() {
        let items = parse_items("src/\nfile1.txt\r\nfile2.txt");
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["src/", "file1.txt", "file2.txt"]);
    }

    #[test]
    fn drops_blank_lines() {
        let items = parse_items("\nsrc/\n  \t\t\t   \nfile.txt\n  ");
        assert_eq!(items, vec![Item::new("src/", 0), Item::new("file.txt", 0)]);
    }
}
