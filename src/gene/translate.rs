//! Standard genetic code translation.

/// A single nucleotide base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    T,
    C,
    A,
    G,
}

impl Base {
    /// Parse a base from a character.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'T' | 'U' => Some(Base::T), // U is treated as T
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            _ => None,
        }
    }

    /// Position of this base in the TCAG ordering of [`STANDARD_CODE`]
    fn index(self) -> usize {
        self as usize
    }
}

/// Amino acids for all 64 codons, first base slowest, in TCAG order
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Residue used for codons containing anything other than A/C/G/T/U
pub const UNKNOWN_RESIDUE: char = 'X';

/// Stop codon marker in translated sequences
pub const STOP_RESIDUE: char = '*';

/// Translate a single codon.
///
/// Returns [`UNKNOWN_RESIDUE`] if the codon is not exactly three valid bases.
pub fn translate_codon(codon: &str) -> char {
    let mut bases = codon.chars().map(Base::from_char);
    match (bases.next(), bases.next(), bases.next(), bases.next()) {
        (Some(Some(b1)), Some(Some(b2)), Some(Some(b3)), None) => {
            STANDARD_CODE[b1.index() * 16 + b2.index() * 4 + b3.index()] as char
        }
        _ => UNKNOWN_RESIDUE,
    }
}

/// Translate a coding sequence with the standard genetic code.
///
/// Stop codons become `*`. A trailing partial codon is dropped.
///
/// # Example
///
/// ```
/// use ferro_interface::gene::translate;
///
/// assert_eq!(translate("ATGAAAGTTTAA"), "MKV*");
/// assert_eq!(translate("ATGNNNGT"), "MX");
/// ```
pub fn translate(cds: &str) -> String {
    let bytes = cds.as_bytes();
    bytes
        .chunks_exact(3)
        .map(|codon| match std::str::from_utf8(codon) {
            Ok(codon) => translate_codon(codon),
            Err(_) => UNKNOWN_RESIDUE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_char() {
        assert_eq!(Base::from_char('a'), Some(Base::A));
        assert_eq!(Base::from_char('U'), Some(Base::T));
        assert_eq!(Base::from_char('N'), None);
    }

    #[test]
    fn test_translate_codon() {
        assert_eq!(translate_codon("ATG"), 'M');
        assert_eq!(translate_codon("TGG"), 'W');
        assert_eq!(translate_codon("TAA"), '*');
        assert_eq!(translate_codon("TAG"), '*');
        assert_eq!(translate_codon("TGA"), '*');
        assert_eq!(translate_codon("GGC"), 'G');
        assert_eq!(translate_codon("aug"), 'M');
        assert_eq!(translate_codon("AT"), 'X');
        assert_eq!(translate_codon("ATGA"), 'X');
        assert_eq!(translate_codon("ANG"), 'X');
    }

    #[test]
    fn test_translate_drops_partial_codon() {
        assert_eq!(translate("ATGGCCTGGA"), "MAW");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_all_codons_translate() {
        let bases = ['T', 'C', 'A', 'G'];
        let mut stops = 0;
        for b1 in bases {
            for b2 in bases {
                for b3 in bases {
                    let aa = translate_codon(&format!("{}{}{}", b1, b2, b3));
                    assert_ne!(aa, UNKNOWN_RESIDUE);
                    if aa == STOP_RESIDUE {
                        stops += 1;
                    }
                }
            }
        }
        assert_eq!(stops, 3);
    }
}
