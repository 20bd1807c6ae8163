/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Derivation of client authorization names.

use std::borrow::Cow;

/// Separates the user and client part of a name.
const DELIMITER: char = ':';

/** Return the canonical name of the authorization `user_name` granted to
`client_name`.

Both parts are escaped so that the delimiter never occurs within them:
`%` becomes `%25` and `:` becomes `%3A`. This keeps the name reversible (see
[split_name]) and no two different pairs yield the same name. Names free of
`%` and `:` are left untouched, e.g. `alice:cli-1`.
*/
pub fn derive_name(user_name: &str, client_name: &str) -> String {
    format!("{}{DELIMITER}{}", escape(user_name), escape(client_name))
}

/// Return the user and client name a derived `name` was created from, or
/// `None` if the `name` could not have been produced by [derive_name].
pub fn split_name(name: &str) -> Option<(String, String)> {
    let (user_name, client_name) = name.split_once(DELIMITER)?;
    Some((unescape(user_name)?, unescape(client_name)?))
}

fn escape(component: &str) -> Cow<'_, str> {
    if component.contains(['%', DELIMITER]) {
        Cow::Owned(component.replace('%', "%25").replace(DELIMITER, "%3A"))
    } else {
        Cow::Borrowed(component)
    }
}

fn unescape(component: &str) -> Option<String> {
    let mut ret = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => match (chars.next(), chars.next()) {
                (Some('2'), Some('5')) => ret.push('%'),
                (Some('3'), Some('A')) => ret.push(DELIMITER),
                _ => return None,
            },
            DELIMITER => return None,
            c => ret.push(c),
        }
    }
    Some(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn readable_for_plain_names() {
        assert_eq!(derive_name("alice", "cli-1"), "alice:cli-1");
        assert_eq!(derive_name("a:b", "c"), "a%3Ab:c");
        assert_eq!(derive_name("a", "b:c"), "a:b%3Ac");
        assert_eq!(derive_name("100%", "x"), "100%25:x");
    }

    #[test]
    fn deterministic() {
        for _ in 0..16 {
            assert_eq!(
                derive_name("system:admin", "openshift-web-console"),
                derive_name("system:admin", "openshift-web-console")
            );
        }
    }

    #[test]
    fn reversible() {
        for (user, client) in [("alice", "cli-1"), ("a:b", "c%3A"), ("%", ":"), ("é", "ü:%")] {
            assert_eq!(
                split_name(&derive_name(user, client)),
                Some((user.to_owned(), client.to_owned()))
            );
        }
        assert_eq!(split_name("no-delimiter"), None);
        assert_eq!(split_name("a:b:c"), None);
        assert_eq!(split_name("a%2:b"), None);
    }

    #[test]
    fn no_collisions() {
        let mut corpus = vec![
            "a", "b", "ab", "a:", ":a", "a:b", "b:", "%", "%%", "%3A", "%25", ":", "::", "a%3Ab",
            "a%", "%a", "user", "user:", "user:1", "1", ":1",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();
        for i in 0..40 {
            corpus.push(format!("user{i}"));
            corpus.push(format!("user{i}:"));
            corpus.push(format!("{i}:client"));
            corpus.push(format!("u%{i}"));
        }
        corpus.sort();
        corpus.dedup();
        let mut seen: HashMap<String, (&str, &str)> = HashMap::new();
        for user in &corpus {
            for client in &corpus {
                let name = derive_name(user, client);
                if let Some(previous) = seen.insert(name.clone(), (user.as_str(), client.as_str())) {
                    panic!("'{name}' derived from both {previous:?} and {:?}", (user, client));
                }
            }
        }
        assert_eq!(seen.len(), corpus.len() * corpus.len());
    }
}
