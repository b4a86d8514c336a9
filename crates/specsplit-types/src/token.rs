//! Qualified token parsing and token → path resolution.
//!
//! A token has the form `package:module[/submodule]:Name`. Only the first
//! `/`-separated segment of the module decides the directory an entity is
//! written to, so `aws:ec2/instance:Instance` and `aws:ec2:Instance` share
//! the `ec2/` directory.
//!
//! The file stem is `lowercase(Name) + "-" + hex8(CRC32C(Name))`. The
//! checksum is taken over the original spelling, which keeps names that
//! differ only by case in separate files on case-insensitive filesystems.

use crate::error::{TypeError, TypeResult};
use crate::kind::EntityKind;

/// Characters that are forbidden in every token component.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\\', '\0'];

/// A parsed qualified token borrowing from its source string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    package: &'a str,
    module: &'a str,
    name: &'a str,
}

impl<'a> Token<'a> {
    /// Parse a token, rejecting anything outside the three-part grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use specsplit_types::Token;
    ///
    /// let token = Token::parse("aws:ec2/instance:Instance").unwrap();
    /// assert_eq!(token.module_dir(), "ec2");
    /// assert!(Token::parse("not-a-valid-token").is_err());
    /// ```
    pub fn parse(token: &'a str) -> TypeResult<Self> {
        let invalid = |reason: &str| TypeError::InvalidToken {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = token.split(':');
        let (package, module, name) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(p), Some(m), Some(n), None) => (p, m, n),
            _ => return Err(invalid("expected exactly three ':'-separated components")),
        };

        if let Some(ch) = token.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(invalid(&format!("contains forbidden character: {ch:?}")));
        }
        if package.is_empty() {
            return Err(invalid("package must not be empty"));
        }
        if package.contains('/') {
            return Err(invalid("package must not contain '/'"));
        }
        if module.is_empty() {
            return Err(invalid("module must not be empty"));
        }
        for segment in module.split('/') {
            if segment.is_empty() {
                return Err(invalid("module contains an empty segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("module must not contain '.' or '..' segments"));
            }
        }
        if name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if name.contains('/') {
            return Err(invalid("name must not contain '/'"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name must not be '.' or '..'"));
        }

        Ok(Self {
            package,
            module,
            name,
        })
    }

    pub fn package(&self) -> &'a str {
        self.package
    }

    /// The full module component, including any `/submodule` suffix.
    pub fn module(&self) -> &'a str {
        self.module
    }

    /// The simple type name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The first segment of the module, used as the top-level directory.
    pub fn module_dir(&self) -> &'a str {
        self.module.split('/').next().unwrap_or(self.module)
    }

    /// Collision-disambiguated file stem for this token's simple name.
    pub fn stem(&self) -> String {
        file_stem(self.name)
    }

    /// Relative path (without extension) of this token's primary file.
    ///
    /// Components are always joined with `/` so trees written on one
    /// platform resolve identically on another.
    pub fn relative_path(&self, kind: EntityKind) -> String {
        format!("{}/{}/{}", self.module_dir(), kind.dir_name(), self.stem())
    }
}

/// Resolve a token to the relative path (without extension) of its file.
pub fn resolve(token: &str, kind: EntityKind) -> TypeResult<String> {
    Ok(Token::parse(token)?.relative_path(kind))
}

/// `lowercase(name) + "-" + 8 lowercase hex digits of CRC32C(name)`.
pub fn file_stem(name: &str) -> String {
    let checksum = crc32c::crc32c(name.as_bytes());
    format!("{}-{}", name.to_lowercase(), hex::encode(checksum.to_be_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_simple_token() {
        let token = Token::parse("aws:s3:Bucket").unwrap();
        assert_eq!(token.package(), "aws");
        assert_eq!(token.module(), "s3");
        assert_eq!(token.name(), "Bucket");
        assert_eq!(token.module_dir(), "s3");
    }

    #[test]
    fn submodule_keeps_first_segment_only() {
        let token = Token::parse("aws:ec2/instance/v2:Instance").unwrap();
        assert_eq!(token.module(), "ec2/instance/v2");
        assert_eq!(token.module_dir(), "ec2");
        assert!(token.relative_path(EntityKind::Resource).starts_with("ec2/resources/"));
    }

    #[test]
    fn stem_uses_castagnoli_checksum() {
        // Standard CRC-32C check value.
        assert_eq!(file_stem("123456789"), "123456789-e3069283");
    }

    #[test]
    fn stem_is_lowercase_with_eight_hex_digits() {
        let stem = file_stem("BucketPolicy");
        let (base, suffix) = stem.rsplit_once('-').unwrap();
        assert_eq!(base, "bucketpolicy");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn resolve_composes_module_kind_and_stem() {
        let path = resolve("aws:s3:Bucket", EntityKind::Type).unwrap();
        assert_eq!(path, format!("s3/types/{}", file_stem("Bucket")));
    }

    #[test]
    fn case_only_differences_get_distinct_paths() {
        let a = resolve("pkg:mod:Widget", EntityKind::Resource).unwrap();
        let b = resolve("pkg:mod:WIDGET", EntityKind::Resource).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("mod/resources/widget-"));
        assert!(b.starts_with("mod/resources/widget-"));
    }

    #[test]
    fn invalid_tokens_are_rejected() {
        for bad in [
            "not-a-valid-token",
            "a:b",
            "a:b:c:d",
            ":mod:Name",
            "pkg::Name",
            "pkg:mod:",
            "pkg:mod/:Name",
            "pkg:../etc:Name",
            "pkg:mod:a/b",
            "pkg:mod:..",
            "pkg:mod:Na me",
            "pkg:mod\\x:Name",
            "",
        ] {
            let err = Token::parse(bad).unwrap_err();
            assert!(
                matches!(err, TypeError::InvalidToken { .. }),
                "expected InvalidToken for {bad:?}"
            );
        }
    }

    #[test]
    fn resolve_propagates_invalid_token() {
        let err = resolve("not-a-valid-token", EntityKind::Function).unwrap_err();
        assert!(matches!(err, TypeError::InvalidToken { ref token, .. } if token == "not-a-valid-token"));
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(
            package in "[a-z][a-z0-9-]{0,8}",
            module in "[a-z][a-z0-9]{0,8}(/[a-z0-9]{1,6})?",
            name in "[A-Za-z][A-Za-z0-9_]{0,16}",
        ) {
            let token = format!("{package}:{module}:{name}");
            let first = resolve(&token, EntityKind::Resource).unwrap();
            let second = resolve(&token, EntityKind::Resource).unwrap();
            prop_assert_eq!(&first, &second);
            let top = module.split('/').next().unwrap();
            let expected_prefix = format!("{top}/resources/");
            prop_assert!(first.starts_with(&expected_prefix));
        }
    }
}
