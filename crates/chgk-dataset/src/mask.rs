//! Answer mask decoding
//!
//! A mask has one character per question: `'1'` for a correct answer, `'0'`
//! for a wrong one, and anything else (`'X'`, `'?'`, ...) for a question
//! that was removed or has no verdict. Only the two binary outcomes become
//! labels; every other character is dropped.

/// Binary outcomes decoded from a mask, in question order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMask {
    answers: Vec<u8>,
}

impl DecodedMask {
    /// Decode a mask string
    ///
    /// # Examples
    ///
    /// ```
    /// use chgk_dataset::mask::DecodedMask;
    ///
    /// let decoded = DecodedMask::decode("01X1?");
    /// assert_eq!(decoded.answers(), &[0, 1, 1]);
    /// assert_eq!(decoded.len(), 3);
    /// assert!(DecodedMask::decode("XX?").is_empty());
    /// ```
    #[must_use]
    pub fn decode(mask: &str) -> Self {
        let answers = mask
            .chars()
            .filter_map(|c| match c {
                '0' => Some(0),
                '1' => Some(1),
                _ => None,
            })
            .collect();
        Self { answers }
    }

    #[must_use]
    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
