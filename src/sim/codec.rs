//! Bijective encoding of [`WorldState`] into a mixed-radix index or a digit
//! array.
//!
//! Both directions are driven by one ordered field table, so `decode` undoes
//! `encode` by construction:
//!
//! ```text
//! seeker.x, seeker.y,
//! evader[0].x, evader[0].y, ..., evader[N-1].x, evader[N-1].y,
//! evader[0].facing, ..., evader[N-1].facing
//! ```
//!
//! Raw coordinates are normalized to zero-based digits first: `x -> (x-1)/2`
//! on the doubled horizontal axis, `y -> y-1` on the vertical one.

use std::fmt;

use super::error::CodecError;
use super::types::{EvaderState, WorldState};
use crate::maze::{Facing, GridMap, Position};

/// One encoded field of a [`WorldState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SeekerX,
    SeekerY,
    EvaderX(usize),
    EvaderY(usize),
    EvaderFacing(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::SeekerX => write!(f, "seeker.x"),
            Field::SeekerY => write!(f, "seeker.y"),
            Field::EvaderX(i) => write!(f, "evader[{}].x", i),
            Field::EvaderY(i) => write!(f, "evader[{}].y", i),
            Field::EvaderFacing(i) => write!(f, "evader[{}].facing", i),
        }
    }
}

/// Converts between [`WorldState`] and its encoded forms for a fixed map size
/// and evader count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCodec {
    n_evaders: usize,
    fields: Vec<(Field, u32)>,
    bound: Option<u64>,
}

impl StateCodec {
    /// Builds the field table for `map` and `n_evaders` evaders.
    pub fn new(map: &GridMap, n_evaders: usize) -> Self {
        let cols = map.cell_columns() as u32;
        let rows = map.cell_rows() as u32;
        let facings = Facing::COUNT as u32;

        let mut fields = vec![(Field::SeekerX, cols), (Field::SeekerY, rows)];
        for i in 0..n_evaders {
            fields.push((Field::EvaderX(i), cols));
            fields.push((Field::EvaderY(i), rows));
        }
        for i in 0..n_evaders {
            fields.push((Field::EvaderFacing(i), facings));
        }

        let bound = fields
            .iter()
            .try_fold(1u64, |acc, &(_, radix)| acc.checked_mul(u64::from(radix)));

        Self {
            n_evaders,
            fields,
            bound,
        }
    }

    pub fn n_evaders(&self) -> usize {
        self.n_evaders
    }

    /// The ordered `(field, radix)` table.
    pub fn fields(&self) -> &[(Field, u32)] {
        &self.fields
    }

    /// Number of digits in the array form.
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Size of the scalar state space, `None` when it exceeds `u64`.
    pub fn bound(&self) -> Option<u64> {
        self.bound
    }

    /// Array form: one normalized digit per field, in table order.
    pub fn to_digits(&self, state: &WorldState) -> Result<Vec<u32>, CodecError> {
        if state.evaders.len() != self.n_evaders {
            return Err(CodecError::LengthMismatch {
                expected: self.n_evaders,
                found: state.evaders.len(),
            });
        }

        self.fields
            .iter()
            .map(|&(field, radix)| {
                let digit = Self::digit_of(state, field)?;
                if digit >= u64::from(radix) {
                    return Err(CodecError::OutOfRange {
                        field,
                        digit,
                        radix,
                    });
                }
                Ok(digit as u32)
            })
            .collect()
    }

    /// Inverse of [`StateCodec::to_digits`].
    pub fn from_digits(&self, digits: &[u32]) -> Result<WorldState, CodecError> {
        if digits.len() != self.fields.len() {
            return Err(CodecError::LengthMismatch {
                expected: self.fields.len(),
                found: digits.len(),
            });
        }

        let mut state = WorldState::new(
            Position::new(0, 0),
            vec![EvaderState::new(Position::new(0, 0), Facing::East); self.n_evaders],
        );

        for (&(field, radix), &digit) in self.fields.iter().zip(digits) {
            if digit >= radix {
                return Err(CodecError::OutOfRange {
                    field,
                    digit: u64::from(digit),
                    radix,
                });
            }
            let d = digit as usize;
            match field {
                Field::SeekerX => state.seeker.x = 2 * d + 1,
                Field::SeekerY => state.seeker.y = d + 1,
                Field::EvaderX(i) => state.evaders[i].position.x = 2 * d + 1,
                Field::EvaderY(i) => state.evaders[i].position.y = d + 1,
                Field::EvaderFacing(i) => {
                    // digit < radix == Facing::COUNT
                    state.evaders[i].facing = Facing::from_index(d).unwrap_or(Facing::Captured);
                }
            }
        }

        Ok(state)
    }

    /// Scalar form: folds the digits most-significant-first.
    pub fn encode(&self, state: &WorldState) -> Result<u64, CodecError> {
        self.scalar_bound()?;
        let digits = self.to_digits(state)?;
        Ok(self
            .fields
            .iter()
            .zip(digits)
            .fold(0u64, |acc, (&(_, radix), digit)| {
                acc * u64::from(radix) + u64::from(digit)
            }))
    }

    /// Inverse of [`StateCodec::encode`].
    pub fn decode(&self, index: u64) -> Result<WorldState, CodecError> {
        let bound = self.scalar_bound()?;
        if index >= bound {
            return Err(CodecError::IndexOutOfRange { index, bound });
        }

        let mut digits = vec![0u32; self.fields.len()];
        let mut rest = index;
        for (slot, &(_, radix)) in digits.iter_mut().zip(&self.fields).rev() {
            let radix = u64::from(radix);
            *slot = (rest % radix) as u32;
            rest /= radix;
        }
        self.from_digits(&digits)
    }

    fn scalar_bound(&self) -> Result<u64, CodecError> {
        self.bound.ok_or(CodecError::ScalarOverflow {
            evaders: self.n_evaders,
        })
    }

    fn digit_of(state: &WorldState, field: Field) -> Result<u64, CodecError> {
        match field {
            Field::SeekerX => Self::column_digit(field, state.seeker.x),
            Field::SeekerY => Self::row_digit(field, state.seeker.y),
            Field::EvaderX(i) => Self::column_digit(field, state.evaders[i].position.x),
            Field::EvaderY(i) => Self::row_digit(field, state.evaders[i].position.y),
            Field::EvaderFacing(i) => Ok(state.evaders[i].facing.index() as u64),
        }
    }

    fn column_digit(field: Field, x: usize) -> Result<u64, CodecError> {
        if x % 2 == 0 {
            return Err(CodecError::Misaligned { field, value: x });
        }
        Ok(((x - 1) / 2) as u64)
    }

    fn row_digit(field: Field, y: usize) -> Result<u64, CodecError> {
        match y.checked_sub(1) {
            Some(d) => Ok(d as u64),
            None => Err(CodecError::Misaligned { field, value: y }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classic() -> GridMap {
        GridMap::classic().unwrap()
    }

    fn one_evader_state() -> WorldState {
        WorldState::new(
            Position::new(1, 1),
            vec![EvaderState::new(Position::new(5, 3), Facing::South)],
        )
    }

    #[test]
    fn field_order_puts_facings_last() {
        let codec = StateCodec::new(&classic(), 2);
        let order: Vec<_> = codec.fields().iter().map(|(f, _)| *f).collect();
        assert_eq!(
            order,
            vec![
                Field::SeekerX,
                Field::SeekerY,
                Field::EvaderX(0),
                Field::EvaderY(0),
                Field::EvaderX(1),
                Field::EvaderY(1),
                Field::EvaderFacing(0),
                Field::EvaderFacing(1),
            ]
        );
    }

    #[test]
    fn bound_for_classic_maze() {
        let map = classic();
        assert_eq!(StateCodec::new(&map, 1).bound(), Some(9 * 9 * 9 * 9 * 5));
        assert_eq!(
            StateCodec::new(&map, 3).bound(),
            Some(81 * 405 * 405 * 405)
        );
    }

    #[test]
    fn bound_overflows_for_many_evaders() {
        let codec = StateCodec::new(&classic(), 12);
        assert_eq!(codec.bound(), None);
        let state = WorldState::new(
            Position::new(1, 1),
            vec![EvaderState::new(Position::new(1, 1), Facing::East); 12],
        );
        assert_eq!(
            codec.encode(&state),
            Err(CodecError::ScalarOverflow { evaders: 12 })
        );
        // The array form still works.
        let digits = codec.to_digits(&state).unwrap();
        assert_eq!(codec.from_digits(&digits).unwrap(), state);
    }

    #[test]
    fn encode_matches_hand_computed_index() {
        let codec = StateCodec::new(&classic(), 1);
        let state = one_evader_state();
        // digits [0, 0, 2, 2, 2]: ((2 * 9) + 2) * 5 + 2
        assert_eq!(codec.encode(&state).unwrap(), 102);
        assert_eq!(codec.to_digits(&state).unwrap(), vec![0, 0, 2, 2, 2]);
    }

    #[test]
    fn captured_facing_round_trips() {
        let codec = StateCodec::new(&classic(), 1);
        let mut state = one_evader_state();
        state.evaders[0].facing = Facing::Captured;
        let index = codec.encode(&state).unwrap();
        assert_eq!(codec.decode(index).unwrap(), state);
    }

    #[test]
    fn rejects_even_column() {
        let codec = StateCodec::new(&classic(), 1);
        let mut state = one_evader_state();
        state.seeker.x = 4;
        assert_eq!(
            codec.encode(&state),
            Err(CodecError::Misaligned {
                field: Field::SeekerX,
                value: 4
            })
        );
    }

    #[test]
    fn rejects_coordinate_past_radix() {
        let codec = StateCodec::new(&classic(), 1);
        let mut state = one_evader_state();
        state.evaders[0].position.y = 10;
        assert_eq!(
            codec.encode(&state),
            Err(CodecError::OutOfRange {
                field: Field::EvaderY(0),
                digit: 9,
                radix: 9
            })
        );
    }

    #[test]
    fn rejects_wrong_evader_count() {
        let codec = StateCodec::new(&classic(), 2);
        assert_eq!(
            codec.encode(&one_evader_state()),
            Err(CodecError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn rejects_index_at_bound() {
        let codec = StateCodec::new(&classic(), 1);
        let bound = codec.bound().unwrap();
        assert_eq!(
            codec.decode(bound),
            Err(CodecError::IndexOutOfRange { index: bound, bound })
        );
    }

    #[test]
    fn rejects_digit_past_radix() {
        let codec = StateCodec::new(&classic(), 1);
        assert_eq!(
            codec.from_digits(&[0, 0, 0, 0, 5]),
            Err(CodecError::OutOfRange {
                field: Field::EvaderFacing(0),
                digit: 5,
                radix: 5
            })
        );
    }

    fn reachable_state(n_evaders: usize) -> impl Strategy<Value = WorldState> {
        let cells = classic().open_cells().to_vec();
        let evader = (prop::sample::select(cells.clone()), 0..Facing::COUNT).prop_map(
            |(position, facing)| {
                EvaderState::new(position, Facing::from_index(facing).unwrap())
            },
        );
        (
            prop::sample::select(cells),
            prop::collection::vec(evader, n_evaders),
        )
            .prop_map(|(seeker, evaders)| WorldState::new(seeker, evaders))
    }

    proptest! {
        #[test]
        fn decode_inverts_encode_one_evader(state in reachable_state(1)) {
            let codec = StateCodec::new(&classic(), 1);
            let index = codec.encode(&state).unwrap();
            prop_assert!(index < codec.bound().unwrap());
            prop_assert_eq!(codec.decode(index).unwrap(), state);
        }

        #[test]
        fn decode_inverts_encode_three_evaders(state in reachable_state(3)) {
            let codec = StateCodec::new(&classic(), 3);
            let index = codec.encode(&state).unwrap();
            prop_assert!(index < codec.bound().unwrap());
            prop_assert_eq!(codec.decode(index).unwrap(), state.clone());
            let digits = codec.to_digits(&state).unwrap();
            prop_assert_eq!(codec.from_digits(&digits).unwrap(), state);
        }

        #[test]
        fn encode_inverts_decode_three_evaders(index in 0u64..(81 * 405 * 405 * 405)) {
            let codec = StateCodec::new(&classic(), 3);
            let state = codec.decode(index).unwrap();
            prop_assert_eq!(codec.encode(&state).unwrap(), index);
        }
    }

    #[test]
    fn every_one_evader_index_round_trips() {
        let codec = StateCodec::new(&classic(), 1);
        for index in 0..codec.bound().unwrap() {
            let state = codec.decode(index).unwrap();
            assert_eq!(codec.encode(&state).unwrap(), index);
        }
    }
}
