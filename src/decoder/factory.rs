//! LDPC decoder factory.
//!
//! This module contains routines to build an LDPC decoder generically over the
//! decoding method. Such decoders are represented by `Box<dyn LdpcDecoder>`,
//! using the trait [`LdpcDecoder`].

use super::{
    enumeration::{self, Decision},
    prprp, Error, LdpcDecoder,
};
use crate::sparse::SparseMatrix;
use enum_iterator::Sequence;

/// LDPC decoding method.
///
/// This enum lists the decoding methods supported by the channel benchmark.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Sequence)]
pub enum DecodeMethod {
    /// Probability propagation, see [`prprp`].
    #[default]
    Prprp,
    /// Maximum likelihood codeword by enumeration.
    EnumBlock,
    /// Maximum a posteriori bits by enumeration.
    EnumBit,
}

impl DecodeMethod {
    /// Returns the name of the method, as accepted by [`str::parse`].
    pub fn name(&self) -> &'static str {
        match self {
            DecodeMethod::Prprp => "prprp",
            DecodeMethod::EnumBlock => "enum_block",
            DecodeMethod::EnumBit => "enum_bit",
        }
    }

    /// Parses a method name.
    ///
    /// The name is matched ignoring case. Returns `None` if it does not name
    /// any method.
    pub fn from_name(s: &str) -> Option<DecodeMethod> {
        enum_iterator::all::<DecodeMethod>().find(|m| m.name().eq_ignore_ascii_case(s))
    }

    /// Builds an LDPC decoder.
    ///
    /// Given a parity check matrix, this function builds an LDPC decoder
    /// corresponding to this decoding method.
    pub fn build_decoder(&self, h: SparseMatrix) -> Result<Box<dyn LdpcDecoder>, Error> {
        Ok(match self {
            DecodeMethod::Prprp => Box::new(prprp::Decoder::new(h)),
            DecodeMethod::EnumBlock => Box::new(enumeration::Decoder::new(h, Decision::Block)?),
            DecodeMethod::EnumBit => Box::new(enumeration::Decoder::new(h, Decision::Bit)?),
        })
    }
}

impl std::str::FromStr for DecodeMethod {
    type Err = std::convert::Infallible;

    /// Unknown names select [`DecodeMethod::Prprp`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DecodeMethod::from_name(s).unwrap_or_default())
    }
}

impl std::fmt::Display for DecodeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::star::StarCode;

    #[test]
    fn parse() {
        assert_eq!("prprp".parse(), Ok(DecodeMethod::Prprp));
        assert_eq!("ENUM_BLOCK".parse(), Ok(DecodeMethod::EnumBlock));
        assert_eq!("Enum_Bit".parse(), Ok(DecodeMethod::EnumBit));
        assert_eq!("bogus".parse(), Ok(DecodeMethod::Prprp));
        assert_eq!(DecodeMethod::from_name("bogus"), None);
        for method in enum_iterator::all::<DecodeMethod>() {
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }

    #[test]
    fn build() {
        let h = StarCode::new(2, 3).unwrap().matrix().h();
        let mut lratios = vec![0.25; 12];
        lratios[5] = 4.0;
        for method in enum_iterator::all::<DecodeMethod>() {
            let mut decoder = method.build_decoder(h.clone()).unwrap();
            let output = decoder.decode(&lratios, 20).unwrap();
            assert!(output.codeword.iter().all(|&b| b == 0));
        }
        let big = StarCode::new(16, 17).unwrap().matrix().h();
        assert!(DecodeMethod::Prprp.build_decoder(big.clone()).is_ok());
        assert!(DecodeMethod::EnumBlock.build_decoder(big).is_err());
    }
}
