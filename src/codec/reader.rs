//! Chemx text -> [`ChemxDocument`].
//!
//! Parsing happens in two passes: the payload is first read as untyped JSON
//! (a failure there is a [`ChemxError::Syntax`]), then its shape is checked
//! and converted field by field (a failure there is a
//! [`ChemxError::Format`]). Referential integrity is not checked here; see
//! [`crate::keyframes::validate_keyframes`].

use std::io::Read;

use glam::Vec3;
use serde_json::{Map, Value};

use crate::error::ChemxError;
use crate::model::{
    AtomMap, AtomState, BondState, BondType, ChemxDocument, Keyframe,
    Metadata,
};

type Object = Map<String, Value>;

/// Parse a Chemx document from text.
pub fn parse(text: &str) -> Result<ChemxDocument, ChemxError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| ChemxError::Syntax(e.to_string()))?;
    document_from_value(&root)
}

/// Parse a Chemx document from a reader.
pub fn read<R: Read>(mut reader: R) -> Result<ChemxDocument, ChemxError> {
    let mut text = String::new();
    let _ = reader.read_to_string(&mut text)?;
    parse(&text)
}

fn format_err(msg: impl Into<String>) -> ChemxError {
    ChemxError::Format(msg.into())
}

fn document_from_value(root: &Value) -> Result<ChemxDocument, ChemxError> {
    let root = root
        .as_object()
        .ok_or_else(|| format_err("top level is not an object"))?;

    let version = root
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| format_err("missing or non-string `version`"))?;
    let metadata = root
        .get("metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| format_err("missing or non-object `metadata`"))?;
    let duration = root
        .get("duration")
        .ok_or_else(|| format_err("missing `duration`"))
        .and_then(|v| millis(v, "duration"))?;
    let keyframes = root
        .get("keyframes")
        .and_then(Value::as_array)
        .ok_or_else(|| format_err("missing or non-array `keyframes`"))?;
    if keyframes.is_empty() {
        return Err(format_err("`keyframes` is empty"));
    }

    let keyframes = keyframes
        .iter()
        .enumerate()
        .map(|(i, kf)| keyframe_from_value(i, kf))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChemxDocument {
        version: version.to_owned(),
        metadata: metadata_from_object(metadata),
        duration,
        keyframes,
    })
}

/// Non-negative integer milliseconds. Fractional values are rounded.
fn millis(value: &Value, field: &str) -> Result<u64, ChemxError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => Ok(f.round() as u64),
        Some(_) => Err(format_err(format!("`{field}` must be non-negative"))),
        None => Err(format_err(format!("`{field}` is not a number"))),
    }
}

fn metadata_from_object(obj: &Object) -> Metadata {
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    Metadata {
        name: text("name"),
        description: text("description"),
        created: obj
            .get("created")
            .and_then(|v| millis(v, "created").ok())
            .unwrap_or(0),
    }
}

fn keyframe_from_value(
    index: usize,
    value: &Value,
) -> Result<Keyframe, ChemxError> {
    let obj = value
        .as_object()
        .ok_or_else(|| {
            format_err(format!("keyframe {index} is not an object"))
        })?;
    let timestamp = obj
        .get("timestamp")
        .ok_or_else(|| {
            format_err(format!("keyframe {index} has no timestamp"))
        })
        .and_then(|v| millis(v, "timestamp"))?;
    let atoms = obj
        .get("atoms")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            format_err(format!("keyframe {index} has no atom array"))
        })?;
    let bonds = obj
        .get("bonds")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            format_err(format!("keyframe {index} has no bond array"))
        })?;

    let mut atom_map = AtomMap::new();
    let mut unnamed = 0;
    for atom in atoms {
        let atom = atom_from_value(index, atom)?;
        let key = if atom.id.is_empty() {
            // Kept under a placeholder so validation reports each one.
            placeholder_key(&atom_map, &mut unnamed)
        } else if atom_map.contains_key(&atom.id) {
            return Err(format_err(format!(
                "keyframe {index} repeats atom id `{}`",
                atom.id
            )));
        } else {
            atom.id.clone()
        };
        let _ = atom_map.insert(key, atom);
    }

    let bonds = bonds
        .iter()
        .map(|b| bond_from_value(index, b))
        .collect::<Result<Vec<_>, _>>()?;

    let mut keyframe = Keyframe::new(timestamp, atom_map, bonds);
    keyframe.recount_bonds();
    Ok(keyframe)
}

/// First unused `<missing id N>` key for an atom without an id.
fn placeholder_key(atoms: &AtomMap, counter: &mut usize) -> String {
    loop {
        *counter += 1;
        let key = format!("<missing id {counter}>");
        if !atoms.contains_key(&key) {
            return key;
        }
    }
}

/// Missing or non-numeric coordinates default to 0.0.
fn position_from_value(value: Option<&Value>) -> Vec3 {
    let coord = |key: &str| {
        value
            .and_then(|v| v.get(key))
            .and_then(Value::as_f64)
            .unwrap_or(0.0) as f32
    };
    Vec3::new(coord("x"), coord("y"), coord("z"))
}

fn atom_from_value(kf: usize, value: &Value) -> Result<AtomState, ChemxError> {
    let obj = value
        .as_object()
        .ok_or_else(|| {
            format_err(format!("keyframe {kf}: atom is not an object"))
        })?;
    let id = obj.get("id").and_then(Value::as_str).unwrap_or_default();
    let symbol = obj.get("symbol").and_then(Value::as_str).unwrap_or_default();
    let position = position_from_value(obj.get("position"));

    let mut atom = AtomState::from_element(id, symbol, position);
    let charge = obj.get("charge").and_then(Value::as_f64);
    atom.set_charge(charge.map(|q| q as f32));
    if let Some(electrons) = obj.get("electrons").and_then(Value::as_u64) {
        atom.electrons = u32::try_from(electrons).unwrap_or(u32::MAX);
    }
    Ok(atom)
}

/// Bond order 1, 2 or 3. Integral floats such as `2.0` are accepted.
fn bond_order(
    kf: usize,
    id: &str,
    value: Option<&Value>,
) -> Result<Option<u8>, ChemxError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    value
        .as_f64()
        .filter(|o| o.fract() == 0.0 && (1.0..=3.0).contains(o))
        .map(|o| Some(o as u8))
        .ok_or_else(|| {
            format_err(format!(
                "keyframe {kf}: bond `{id}` has order {value}, \
                 expected 1, 2 or 3"
            ))
        })
}

fn bond_from_value(kf: usize, value: &Value) -> Result<BondState, ChemxError> {
    let obj = value
        .as_object()
        .ok_or_else(|| {
            format_err(format!("keyframe {kf}: bond is not an object"))
        })?;
    let id = obj.get("id").and_then(Value::as_str).unwrap_or_default();

    let pair = obj
        .get("atomIds")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().map(Value::as_str).collect::<Vec<_>>());
    let [Some(a), Some(b)] = pair.as_deref().unwrap_or_default() else {
        return Err(format_err(format!(
            "keyframe {kf}: bond `{id}` needs exactly two atom id strings"
        )));
    };

    let bond_type = match obj.get("bondType") {
        None | Some(Value::Null) => BondType::default(),
        Some(v) => v.as_str().and_then(BondType::parse).ok_or_else(|| {
            format_err(format!(
                "keyframe {kf}: bond `{id}` has unknown bondType"
            ))
        })?,
    };

    let mut bond = BondState::new(id, *a, *b, bond_type);
    if let Some(order) = bond_order(kf, id, obj.get("order"))? {
        bond.order = order;
    }
    if let Some(strength) = obj.get("strength").and_then(Value::as_f64) {
        bond.strength = strength as f32;
    }
    Ok(bond)
}
