//! Parser combinators for nuclide identifiers

// internal modules
use crate::{IsomerState, Nuclide};

// naa modules
use naa_utils::StringExt;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{alpha1, one_of};
use nom::combinator::opt;
use nom::error::{Error, ErrorKind};
use nom::{Err, IResult};

/// Parse a string into a usable Nuclide as a common type
///
/// Accepts either convention:
///     - symbol first: Co, Co60, co-60, Tc_99m, Hf178m2
///     - mass first: 60Co, 99mTc
///
/// Symbol-first must be tried before mass-first would ever be ambiguous, so
/// something like "104mn" is always read as N-104m rather than Mn-104. The
/// mass-first form only supports the plain `m` marker since a trailing level
/// number cannot be told apart from the mass digits.
pub(crate) fn nuclide(i: &str) -> IResult<&str, Nuclide> {
    alt((symbol_first, mass_first))(i)
}

/// The `Symbol[-_]A[meta]` convention, element-only allowed
fn symbol_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, element) = element(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, mass) = opt(mass_number)(i)?;

    // Only look for an isomer tag when it follows a mass number
    let (i, state) = match mass {
        Some(_) => isomer_tag(i)?,
        None => (i, IsomerState::Ground),
    };

    Ok((
        i,
        Nuclide {
            symbol: element.capitalise(),
            mass: mass.unwrap_or(0),
            state,
        },
    ))
}

/// The `A[m]Symbol` convention, e.g. 177Lu, 99mTc
fn mass_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, mass) = mass_number(i)?;
    let (i, marker) = opt(one_of("mM"))(i)?;
    let (i, element) = element(i)?;

    let state = match marker {
        Some(_) => IsomerState::Metastable,
        None => IsomerState::Ground,
    };

    Ok((
        i,
        Nuclide {
            symbol: element.capitalise(),
            mass,
            state,
        },
    ))
}

/// Get the element symbol, at most two letters
fn element(i: &str) -> IResult<&str, &str> {
    let (i, element) = alpha1(i)?;

    if element.len() > 2 {
        Err(Err::Error(Error::new(i, ErrorKind::Fail)))
    } else {
        Ok((i, element))
    }
}

/// Get a positive mass number
fn mass_number(i: &str) -> IResult<&str, u32> {
    let (i, mass) = nom::character::complete::u32(i)?;

    if mass == 0 {
        Err(Err::Error(Error::new(i, ErrorKind::Fail)))
    } else {
        Ok((i, mass))
    }
}

/// List of possible separators people may use
fn separator(i: &str) -> IResult<&str, char> {
    one_of("-_")(i)
}

/// Get the isomeric state from a trailing `m`/`m<level>` tag
///
/// A bare `m` and a numbered `m1` are different markers in the source tables
/// and stay distinct here. `m0` collapses to the ground state.
fn isomer_tag(i: &str) -> IResult<&str, IsomerState> {
    let (i, marker) = opt(one_of("mM"))(i)?;
    if marker.is_none() {
        return Ok((i, IsomerState::Ground));
    }

    let (i, level) = opt(nom::character::complete::u8)(i)?;
    let state = match level {
        None => IsomerState::Metastable,
        Some(0) => IsomerState::Ground,
        Some(level) => IsomerState::Excited(level),
    };

    Ok((i, state))
}
