// Items in this module are only used in test code.

mod temp_repo;
pub(crate) use temp_repo::TempRepo;

/// Split a decoded tree payload back into `(mode, name, hex id)` triples.
pub(crate) fn parse_tree(payload: &[u8]) -> Vec<(String, String, String)> {
    let mut entries = Vec::new();
    let mut rest = payload;

    while !rest.is_empty() {
        let space = rest.iter().position(|b| *b == b' ').unwrap();
        let nul = rest.iter().position(|b| *b == 0).unwrap();

        let mode = String::from_utf8(rest[..space].to_vec()).unwrap();
        let name = String::from_utf8(rest[space + 1..nul].to_vec()).unwrap();
        let id: String = rest[nul + 1..nul + 21]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        entries.push((mode, name, id));
        rest = &rest[nul + 21..];
    }

    entries
}
