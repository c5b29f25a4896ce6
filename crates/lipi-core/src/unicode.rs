//! Devanagari code points. The classifiers back the output checks in tests.

pub const VIRAMA: char = '\u{094D}';

/// Devanagari block (U+0900..U+097F).
#[cfg(test)]
pub(crate) fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// Dependent vowel signs (matras) U+093E..U+094C plus vocalic L and LL.
#[cfg(test)]
pub(crate) fn is_vowel_sign(c: char) -> bool {
    ('\u{093E}'..='\u{094C}').contains(&c) || matches!(c, '\u{0962}' | '\u{0963}')
}

/// Consonant letters U+0915..U+0939.
#[cfg(test)]
pub(crate) fn is_consonant(c: char) -> bool {
    ('\u{0915}'..='\u{0939}').contains(&c)
}
