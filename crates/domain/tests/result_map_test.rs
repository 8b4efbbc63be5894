use ip6walk_domain::ResultMap;

#[test]
fn test_empty_map_reports_nothing() {
    let map = ResultMap::new();
    assert!(map.is_empty());
    assert!(map.report_lines().is_empty());
}

#[test]
fn test_duplicate_address_unions_names() {
    let mut map = ResultMap::new();
    map.insert("2001:0db8:0000:0000:0000:0000:0000:0001", ["b.example."]);
    map.insert(
        "2001:0db8:0000:0000:0000:0000:0000:0001",
        ["a.example.", "b.example."],
    );

    assert_eq!(map.len(), 1);
    let names: Vec<&String> = map
        .get("2001:0db8:0000:0000:0000:0000:0000:0001")
        .unwrap()
        .iter()
        .collect();
    assert_eq!(names, ["a.example.", "b.example."]);
}

#[test]
fn test_report_sorted_by_address_then_name() {
    let mut map = ResultMap::new();
    map.insert("2001:0db8:0000:0000:0000:0000:0000:00ff", ["z.example."]);
    map.insert(
        "2001:0db8:0000:0000:0000:0000:0000:0001",
        ["mail.example.", "host.example."],
    );
    map.insert("2001:0db8:0000:0000:0000:0000:0000:0010", ["www.example."]);

    assert_eq!(
        map.report_lines(),
        vec![
            "2001:0db8:0000:0000:0000:0000:0000:0001 host.example. mail.example.",
            "2001:0db8:0000:0000:0000:0000:0000:0010 www.example.",
            "2001:0db8:0000:0000:0000:0000:0000:00ff z.example.",
        ]
    );
}

#[test]
fn test_merge_unions_overlapping_entries() {
    let mut left = ResultMap::new();
    left.insert("a", ["x."]);
    left.insert("b", ["y."]);

    let mut right = ResultMap::new();
    right.insert("b", ["z."]);
    right.insert("c", ["w."]);

    left.merge(right);

    assert_eq!(left.len(), 3);
    assert_eq!(left.get("b").unwrap().len(), 2);
    assert_eq!(left.report_lines(), vec!["a x.", "b y. z.", "c w."]);
}
