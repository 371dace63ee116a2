use podcli::cli::{PrefixTable, commands};

#[test]
fn test_ambiguous_and_unique_prefixes() {
    let table = PrefixTable::build(["download", "disable", "details", "rm"]);

    // `d` is shared by three names and resolves to none of them
    assert_eq!(table.resolve("d"), None);
    assert_eq!(
        table.expansions("d").unwrap(),
        ["[de]tails", "[di]sable", "[do]wnload"]
    );

    // `r` is unique
    assert_eq!(table.resolve("r"), Some("rm"));
    assert_eq!(table.expansions("r"), None);
}

#[test]
fn test_every_prefix_of_a_unique_name_resolves() {
    let table = PrefixTable::build(["download", "disable", "details", "rm"]);

    for prefix in ["do", "dow", "down", "downl", "downlo", "downloa", "download"] {
        assert_eq!(table.resolve(prefix), Some("download"), "prefix {}", prefix);
    }
    assert_eq!(table.resolve("dis"), Some("disable"));
    assert_eq!(table.resolve("det"), Some("details"));
}

#[test]
fn test_full_names_resolve_to_themselves() {
    let table = PrefixTable::build(["list", "listen"]);

    // `list` is a prefix of `listen` but still names itself
    assert_eq!(table.resolve("list"), Some("list"));
    assert_eq!(table.resolve("liste"), Some("listen"));
    assert_eq!(table.resolve("listen"), Some("listen"));
    assert_eq!(table.resolve("lis"), None);
}

#[test]
fn test_prefix_map_entries_match_exactly_one_name() {
    let names: Vec<&str> = commands::all_names().collect();
    let table = PrefixTable::build(names.iter().copied());

    for (prefix, name) in table.prefixes() {
        assert!(name.starts_with(prefix.as_str()));
        let count = names.iter().filter(|n| n.starts_with(prefix.as_str())).count();
        assert!(
            count == 1 || names.contains(&prefix.as_str()),
            "{} is shared by {} names",
            prefix,
            count
        );
    }

    for name in &names {
        assert_eq!(table.resolve(name), Some(*name));
    }
}

#[test]
fn test_expansions_list_each_candidate_in_name_order() {
    let names: Vec<&str> = commands::all_names().collect();
    let table = PrefixTable::build(names.iter().copied());

    for (prefix, candidates) in table.ambiguous() {
        assert!(table.resolve(prefix).is_none(), "{} is also unique", prefix);

        let mut expected: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| n.starts_with(prefix.as_str()))
            .collect();
        expected.sort();
        assert_eq!(candidates.len(), expected.len(), "candidates of {}", prefix);

        // `[matched]rest` must spell out the candidate name
        let spelled: Vec<String> = candidates
            .iter()
            .map(|c| c.replace(['[', ']'], ""))
            .collect();
        assert_eq!(spelled, expected);
    }
}

#[test]
fn test_command_table_abbreviations() {
    let table = PrefixTable::build(commands::all_names());

    assert_eq!(table.resolve("su"), Some("subscribe"));
    assert_eq!(table.resolve("up"), Some("update"));
    assert_eq!(table.resolve("b"), Some("bye"));
    assert_eq!(table.resolve("qui"), Some("quit"));
    assert_eq!(table.resolve("que"), Some("query"));
    assert_eq!(table.resolve("q"), None);
    assert_eq!(table.expansions("ex").unwrap(), ["[exi]t", "[exp]ort"]);
}

#[test]
fn test_build_is_deterministic() {
    let a = PrefixTable::build(["rename", "rewrite", "rm"]);
    let b = PrefixTable::build(["rm", "rewrite", "rename"]);

    assert_eq!(a.prefixes(), b.prefixes());
    assert_eq!(a.ambiguous(), b.ambiguous());
    assert_eq!(a.expansions("r").unwrap(), ["[ren]ame", "[rew]rite", "[rm]"]);
}
