use std::io;

use super::{Attribution, Id, Kind, Object};

/// A snapshot: one tree, its parent commits, who made it, and why.
///
/// The committer is always the same as the author.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    tree: Id,
    parents: Vec<Id>,
    author: Attribution,
    message: String,
}

impl Commit {
    pub fn new(tree: Id, parents: Vec<Id>, author: Attribution, message: &str) -> Commit {
        Commit {
            tree,
            parents,
            author,
            message: message.to_string(),
        }
    }

    pub fn tree(&self) -> &Id {
        &self.tree
    }

    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub fn author(&self) -> &Attribution {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the commit payload (without object header).
    ///
    /// ```text
    /// tree <id>
    /// parent <id>        (zero or more, in order)
    /// author <attribution>
    /// committer <attribution>
    ///
    /// <message>
    /// ```
    pub fn encode(&self) -> String {
        let mut lines = Vec::with_capacity(self.parents.len() + 5);

        lines.push(format!("tree {}", self.tree));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author));
        lines.push(format!("committer {}", self.author));
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }

    /// Builds the commit object ready to be stored.
    pub fn to_object(&self) -> io::Result<Object> {
        Object::new(Kind::Commit, Box::new(self.encode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const P1: &str = "3cd9329ac53613a0bfa198ae28f3af957e49573c";
    const P2: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

    fn author() -> Attribution {
        Attribution::new("A U Thor", "author@example.com", 1_142_878_501, 0)
    }

    fn commit(parents: &[&str]) -> Commit {
        Commit::new(
            Id::from_hex(TREE).unwrap(),
            parents.iter().map(|p| Id::from_hex(p).unwrap()).collect(),
            author(),
            "initial import",
        )
    }

    #[test]
    fn no_parents() {
        let c = commit(&[]);
        assert_eq!(
            c.encode(),
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author A U Thor <author@example.com> 1142878501 +0000\n\
             committer A U Thor <author@example.com> 1142878501 +0000\n\
             \n\
             initial import"
        );
        assert!(!c.encode().contains("parent "));
    }

    #[test]
    fn parents_in_supplied_order() {
        let c = commit(&[P2, P1]);
        let text = c.encode();

        let parents: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("parent "))
            .collect();

        assert_eq!(
            parents,
            vec![format!("parent {}", P2), format!("parent {}", P1)]
        );
        assert_eq!(c.parents().len(), 2);
    }

    #[test]
    fn message_is_raw() {
        let c = Commit::new(
            Id::from_hex(TREE).unwrap(),
            vec![],
            author(),
            "subject\n\nbody\n",
        );
        assert!(c.encode().ends_with("\n\nsubject\n\nbody\n"));
        assert_eq!(c.message(), "subject\n\nbody\n");
    }

    #[test]
    fn to_object() {
        let c = commit(&[]);
        let o = c.to_object().unwrap();
        assert_eq!(o.kind(), Kind::Commit);
        assert_eq!(o.len(), c.encode().len());
        assert_eq!(
            o.id().to_string(),
            "f137de56e81ad6fa6c973c865384426cf209e459"
        );
        assert_eq!(c.tree().to_string(), TREE);
        assert_eq!(c.author().name(), "A U Thor");
    }

    #[test]
    fn timestamp_is_part_of_the_id() {
        let later = Attribution::new("A U Thor", "author@example.com", 1_142_878_502, 0);
        let a = commit(&[]).to_object().unwrap();
        let b = Commit::new(Id::from_hex(TREE).unwrap(), vec![], later, "initial import")
            .to_object()
            .unwrap();
        assert_ne!(a.id(), b.id());
    }
}
