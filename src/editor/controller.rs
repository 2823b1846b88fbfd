use glam::Vec3;

use super::buffer::LiveBuffer;
use super::command::{EditMode, EditOutcome, EditorCommand};
use super::history::History;
use crate::error::{ChemxError, ConstraintViolation};
use crate::keyframes::{KeyframeStore, SwitchTarget};
use crate::model::{
    element, AtomMap, AtomState, BondState, BondType, ChemxDocument, Metadata,
    MoleculeTemplate,
};
use crate::options::{EditorOptions, ExportOptions};

/// Interactive editing state machine over a live buffer and a keyframe store.
///
/// Every buffer mutation goes through one combined undo history, so undo
/// always reverts the most recent edit whether it touched atoms, bonds or
/// both. Undo never crosses a keyframe switch.
#[derive(Debug)]
pub struct EditorController {
    live: History<LiveBuffer>,
    store: KeyframeStore,
    mode: EditMode,
    element: String,
    bond_type: BondType,
    working_plane_y: Option<f32>,
    selected_atom: Option<String>,
    bond_start: Option<String>,
    next_id: u64,
}

impl EditorController {
    /// Empty editor with an empty keyframe store.
    pub fn new(options: &EditorOptions) -> Self {
        let element = element::lookup(&options.default_element)
            .map_or("C", |el| el.symbol)
            .to_owned();
        Self {
            live: History::with_limit(
                LiveBuffer::default(),
                options.history_limit,
            ),
            store: KeyframeStore::new(),
            mode: EditMode::default(),
            element,
            bond_type: options.default_bond_type,
            working_plane_y: options.working_plane_y,
            selected_atom: None,
            bond_start: None,
            next_id: 1,
        }
    }

    /// Apply one command to the live buffer or tool state.
    pub fn execute(&mut self, cmd: EditorCommand) -> EditOutcome {
        let outcome = match cmd {
            EditorCommand::SetMode(mode) => {
                self.mode = mode;
                self.bond_start = None;
                EditOutcome::Applied
            }
            EditorCommand::SelectElement { symbol } => {
                self.select_element(&symbol)
            }
            EditorCommand::SelectBondType(bond_type) => {
                self.bond_type = bond_type;
                EditOutcome::Applied
            }
            EditorCommand::ClickScene { point } => self.click_scene(point),
            EditorCommand::ClickAtom { atom_id } => self.click_atom(atom_id),
            EditorCommand::ClickBond { bond_id } => self.click_bond(&bond_id),
            EditorCommand::ClearSelection => {
                if self.selected_atom.is_none() && self.bond_start.is_none() {
                    EditOutcome::NoOp
                } else {
                    self.selected_atom = None;
                    self.bond_start = None;
                    EditOutcome::Deselected
                }
            }
            EditorCommand::MoveAtom { atom_id, position } => {
                self.move_atom(&atom_id, position)
            }
            EditorCommand::SetCharge { atom_id, charge } => {
                self.set_charge(&atom_id, charge)
            }
            EditorCommand::PlaceMolecule {
                template,
                center,
                rotation,
            } => self.place_molecule(&template, center, rotation),
            EditorCommand::Undo => self.undo(),
        };
        match &outcome {
            EditOutcome::Rejected(reason) => {
                log::warn!("edit rejected: {reason}");
            }
            EditOutcome::NoOp => {
                log::debug!("edit had no effect in {:?} mode", self.mode);
            }
            _ => {}
        }
        outcome
    }

    fn select_element(&mut self, symbol: &str) -> EditOutcome {
        match element::lookup(symbol) {
            Some(el) => {
                el.symbol.clone_into(&mut self.element);
                EditOutcome::Applied
            }
            None => {
                log::warn!("unknown element symbol {symbol:?}");
                EditOutcome::NoOp
            }
        }
    }

    fn click_scene(&mut self, point: Vec3) -> EditOutcome {
        match self.mode {
            EditMode::AddAtom => {
                let mut position = point;
                if let Some(y) = self.working_plane_y {
                    position.y = y;
                }
                let id = self.fresh_atom_id();
                let mut atom =
                    AtomState::from_element(id, &self.element, position);
                atom.set_charge(Some(0.0));
                self.edit(|buf| buf.insert_atom(atom));
                EditOutcome::Applied
            }
            EditMode::Select if self.selected_atom.is_some() => {
                self.selected_atom = None;
                EditOutcome::Deselected
            }
            _ => EditOutcome::NoOp,
        }
    }

    fn click_atom(&mut self, atom_id: String) -> EditOutcome {
        if !self.live.current().atoms.contains_key(&atom_id) {
            let unknown = ConstraintViolation::UnknownAtom(atom_id);
            return EditOutcome::Rejected(unknown);
        }
        match self.mode {
            EditMode::Select => {
                self.selected_atom = Some(atom_id);
                EditOutcome::Applied
            }
            EditMode::DeleteAtom => {
                self.edit(|buf| {
                    let _ = buf.remove_atom_cascade(&atom_id);
                });
                if self.selected_atom.as_deref() == Some(atom_id.as_str()) {
                    self.selected_atom = None;
                }
                if self.bond_start.as_deref() == Some(atom_id.as_str()) {
                    self.bond_start = None;
                }
                EditOutcome::Applied
            }
            EditMode::AddBond => match self.bond_start.take() {
                None => {
                    self.bond_start = Some(atom_id);
                    EditOutcome::Applied
                }
                Some(start) if start == atom_id => EditOutcome::Deselected,
                Some(start) => self.add_bond(&start, &atom_id),
            },
            EditMode::AddAtom | EditMode::BreakBond => EditOutcome::NoOp,
        }
    }

    fn add_bond(&mut self, a: &str, b: &str) -> EditOutcome {
        let buf = self.live.current();
        if buf.bond_between(a, b).is_some() {
            return EditOutcome::Rejected(ConstraintViolation::DuplicateBond {
                a: a.to_owned(),
                b: b.to_owned(),
            });
        }
        for id in [a, b] {
            match buf.atoms.get(id) {
                None => return unknown_atom(id),
                Some(atom) if !atom.can_bond() => {
                    let full = ConstraintViolation::ValenceExceeded {
                        atom_id: id.to_owned(),
                        max_bonds: atom.max_bonds,
                    };
                    return EditOutcome::Rejected(full);
                }
                Some(_) => {}
            }
        }
        let bond = BondState::new(self.fresh_bond_id(), a, b, self.bond_type);
        self.edit(|buf| buf.push_bond(bond));
        EditOutcome::Applied
    }

    fn click_bond(&mut self, bond_id: &str) -> EditOutcome {
        if self.mode != EditMode::BreakBond {
            return EditOutcome::NoOp;
        }
        if !self.live.current().bonds.iter().any(|b| b.id == bond_id) {
            let unknown = ConstraintViolation::UnknownBond(bond_id.to_owned());
            return EditOutcome::Rejected(unknown);
        }
        self.edit(|buf| {
            let _ = buf.remove_bond(bond_id);
        });
        EditOutcome::Applied
    }

    fn move_atom(&mut self, atom_id: &str, position: Vec3) -> EditOutcome {
        match self.live.current().atoms.get(atom_id) {
            None => unknown_atom(atom_id),
            Some(atom) if atom.position == position => EditOutcome::NoOp,
            Some(_) => {
                self.edit(|buf| {
                    if let Some(atom) = buf.atoms.get_mut(atom_id) {
                        atom.position = position;
                    }
                });
                EditOutcome::Applied
            }
        }
    }

    fn set_charge(
        &mut self,
        atom_id: &str,
        charge: Option<f32>,
    ) -> EditOutcome {
        match self.live.current().atoms.get(atom_id) {
            None => unknown_atom(atom_id),
            Some(atom) if atom.charge == charge => EditOutcome::NoOp,
            Some(_) => {
                self.edit(|buf| {
                    if let Some(atom) = buf.atoms.get_mut(atom_id) {
                        atom.set_charge(charge);
                    }
                });
                EditOutcome::Applied
            }
        }
    }

    fn place_molecule(
        &mut self,
        template: &MoleculeTemplate,
        center: Vec3,
        rotation: Vec3,
    ) -> EditOutcome {
        let mut center = center;
        if let Some(y) = self.working_plane_y {
            center.y = y;
        }
        let prefix = loop {
            let candidate = format!("mol{}", self.next_id);
            self.next_id += 1;
            let taken = |id: &String| id.starts_with(&format!("{candidate}_"));
            let buf = self.live.current();
            let in_use = buf.atoms.keys().any(taken)
                || buf.bonds.iter().any(|b| taken(&b.id));
            if !in_use {
                break candidate;
            }
        };
        let (atoms, bonds) = template.instantiate(&prefix, center, rotation);
        if atoms.is_empty() {
            return EditOutcome::NoOp;
        }
        self.edit(|buf| {
            for atom in atoms {
                buf.insert_atom(atom);
            }
            buf.bonds.extend(bonds);
        });
        log::debug!("placed {} as {prefix}", template.name);
        EditOutcome::Applied
    }

    fn undo(&mut self) -> EditOutcome {
        if !self.live.undo() {
            return EditOutcome::NoOp;
        }
        let atoms = &self.live.current().atoms;
        let gone = |id: &String| !atoms.contains_key(id);
        if self.selected_atom.as_ref().is_some_and(gone) {
            self.selected_atom = None;
        }
        if self.bond_start.as_ref().is_some_and(gone) {
            self.bond_start = None;
        }
        EditOutcome::Applied
    }

    /// Snapshot, mutate a copy, and make the copy current.
    fn edit(&mut self, f: impl FnOnce(&mut LiveBuffer)) {
        let mut next = self.live.current().clone();
        f(&mut next);
        self.live.set(next);
    }

    fn fresh_atom_id(&mut self) -> String {
        loop {
            let id = format!("atom{}", self.next_id);
            self.next_id += 1;
            if !self.live.current().atoms.contains_key(&id) {
                return id;
            }
        }
    }

    fn fresh_bond_id(&mut self) -> String {
        loop {
            let id = format!("bond{}", self.next_id);
            self.next_id += 1;
            if !self.live.current().bonds.iter().any(|b| b.id == id) {
                return id;
            }
        }
    }

    // ── Keyframes ───────────────────────────────────────────────────

    /// Save the live buffer at the store cursor. Returns the index written.
    pub fn save_keyframe(&mut self) -> Result<usize, ConstraintViolation> {
        let buf = self.live.current();
        let index = self.store.save(&buf.atoms, &buf.bonds)?;
        log::info!("saved keyframe {index}");
        Ok(index)
    }

    /// Move the store cursor and load the matching buffer.
    ///
    /// An existing keyframe is deep-copied into the live buffer; the slot
    /// past the end gives an empty buffer. Undo history and selection are
    /// cleared either way.
    pub fn switch_keyframe(
        &mut self,
        index: usize,
    ) -> Result<(), ConstraintViolation> {
        let next = match self.store.switch_to(index)? {
            SwitchTarget::Existing(keyframe) => {
                LiveBuffer::from_keyframe(keyframe)
            }
            SwitchTarget::NewFrame => LiveBuffer::default(),
        };
        self.live.reset(next);
        self.selected_atom = None;
        self.bond_start = None;
        Ok(())
    }

    /// Replace the store with a parsed document and open its first keyframe.
    pub fn load_document(
        &mut self,
        doc: ChemxDocument,
    ) -> Result<(), ChemxError> {
        self.store.load_document(doc)?;
        self.switch_keyframe(0)?;
        Ok(())
    }

    /// Validate and convert the stored keyframes to an exchange document.
    pub fn export(
        &self,
        metadata: Metadata,
        options: &ExportOptions,
    ) -> Result<ChemxDocument, ChemxError> {
        self.store.to_document(metadata, options)
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The live buffer.
    pub fn buffer(&self) -> &LiveBuffer {
        self.live.current()
    }

    /// Live atoms by id.
    pub fn atoms(&self) -> &AtomMap {
        &self.live.current().atoms
    }

    /// Live bonds.
    pub fn bonds(&self) -> &[BondState] {
        &self.live.current().bonds
    }

    /// The keyframe store.
    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    /// Active tool.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Element symbol placed by the add-atom tool.
    pub fn selected_element(&self) -> &str {
        &self.element
    }

    /// Bond type created by the add-bond tool.
    pub fn selected_bond_type(&self) -> BondType {
        self.bond_type
    }

    /// Atom selected for the position editor.
    pub fn selected_atom(&self) -> Option<&str> {
        self.selected_atom.as_deref()
    }

    /// First atom of a pending bond.
    pub fn bond_start(&self) -> Option<&str> {
        self.bond_start.as_deref()
    }

    /// Whether an undo would change the live buffer.
    pub fn can_undo(&self) -> bool {
        self.live.can_undo()
    }
}

fn unknown_atom(id: &str) -> EditOutcome {
    EditOutcome::Rejected(ConstraintViolation::UnknownAtom(id.to_owned()))
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    fn editor() -> EditorController {
        EditorController::default()
    }

    fn place(ed: &mut EditorController, symbol: &str, point: Vec3) -> String {
        let _ = ed.execute(EditorCommand::SetMode(EditMode::AddAtom));
        let _ = ed.execute(EditorCommand::SelectElement {
            symbol: symbol.into(),
        });
        let before: FxHashSet<String> = ed.atoms().keys().cloned().collect();
        assert!(ed.execute(EditorCommand::ClickScene { point }).is_applied());
        ed.atoms()
            .keys()
            .find(|id| !before.contains(*id))
            .cloned()
            .unwrap()
    }

    fn bond(ed: &mut EditorController, a: &str, b: &str) -> EditOutcome {
        let _ = ed.execute(EditorCommand::SetMode(EditMode::AddBond));
        let _ = ed.execute(EditorCommand::ClickAtom { atom_id: a.into() });
        ed.execute(EditorCommand::ClickAtom { atom_id: b.into() })
    }

    #[test]
    fn add_atom_uses_selected_element_and_plane() {
        let mut ed = EditorController::new(&EditorOptions {
            working_plane_y: Some(2.0),
            ..EditorOptions::default()
        });
        let id = place(&mut ed, "n", Vec3::new(1.0, 9.0, 3.0));
        let atom = &ed.atoms()[&id];
        assert_eq!(atom.symbol, "N");
        assert_eq!(atom.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.charge, Some(0.0));
        assert_eq!(atom.current_bonds, 0);
    }

    #[test]
    fn add_bond_counts_and_clears_pending() {
        let mut ed = editor();
        let o = place(&mut ed, "O", Vec3::ZERO);
        let h = place(&mut ed, "H", Vec3::X);
        assert_eq!(bond(&mut ed, &o, &h), EditOutcome::Applied);
        assert_eq!(ed.bonds().len(), 1);
        assert_eq!(ed.bonds()[0].bond_type, BondType::Covalent);
        assert_eq!(ed.bonds()[0].strength, 1.0);
        assert_eq!(ed.atoms()[&o].current_bonds, 1);
        assert_eq!(ed.atoms()[&h].current_bonds, 1);
        assert!(ed.bond_start().is_none());
    }

    #[test]
    fn clicking_first_atom_twice_deselects() {
        let mut ed = editor();
        let c = place(&mut ed, "C", Vec3::ZERO);
        assert_eq!(bond(&mut ed, &c, &c), EditOutcome::Deselected);
        assert!(ed.bonds().is_empty());
        assert!(ed.bond_start().is_none());
    }

    #[test]
    fn duplicate_pairs_are_never_created() {
        let mut ed = editor();
        let a = place(&mut ed, "C", Vec3::ZERO);
        let b = place(&mut ed, "C", Vec3::X);
        let c = place(&mut ed, "C", Vec3::Y);
        let attempts = [(&a, &b), (&b, &a), (&b, &c), (&a, &b), (&c, &b), (&a, &c)];
        for (x, y) in attempts {
            let _ = bond(&mut ed, x, y);
        }
        assert_eq!(ed.bonds().len(), 3);
        let pairs: FxHashSet<_> = ed.bonds().iter().map(BondState::pair_key).collect();
        assert_eq!(pairs.len(), ed.bonds().len());
        assert!(matches!(
            bond(&mut ed, &b, &a),
            EditOutcome::Rejected(ConstraintViolation::DuplicateBond { .. })
        ));
    }

    #[test]
    fn valence_limit_rejects_bond() {
        let mut ed = editor();
        let h = place(&mut ed, "H", Vec3::ZERO);
        let c1 = place(&mut ed, "C", Vec3::X);
        let c2 = place(&mut ed, "C", Vec3::Y);
        assert!(bond(&mut ed, &h, &c1).is_applied());
        let before = ed.buffer().clone();
        assert_eq!(
            bond(&mut ed, &h, &c2),
            EditOutcome::Rejected(ConstraintViolation::ValenceExceeded {
                atom_id: h,
                max_bonds: 1,
            })
        );
        assert_eq!(ed.buffer(), &before);
    }

    #[test]
    fn cascade_delete_leaves_others_untouched() {
        let mut ed = editor();
        let a = place(&mut ed, "C", Vec3::ZERO);
        let b = place(&mut ed, "C", Vec3::X);
        let c = place(&mut ed, "C", Vec3::Y);
        let d = place(&mut ed, "C", Vec3::Z);
        let _ = bond(&mut ed, &a, &b);
        let _ = bond(&mut ed, &a, &c);
        let _ = bond(&mut ed, &c, &d);
        let untouched = ed.bonds().iter().find(|bd| bd.connects(&c, &d)).cloned().unwrap();

        let _ = ed.execute(EditorCommand::SetMode(EditMode::DeleteAtom));
        assert!(ed.execute(EditorCommand::ClickAtom { atom_id: a.clone() }).is_applied());
        assert!(!ed.atoms().contains_key(&a));
        assert_eq!(ed.atoms().len(), 3);
        assert_eq!(ed.bonds(), std::slice::from_ref(&untouched));
        assert!(ed.bonds().iter().all(|bd| !bd.references(&a)));
        assert_eq!(ed.atoms()[&b].current_bonds, 0);
        assert_eq!(ed.atoms()[&c].current_bonds, 1);
    }

    #[test]
    fn undo_restores_cascade_delete() {
        let mut ed = editor();
        let a = place(&mut ed, "C", Vec3::ZERO);
        let b = place(&mut ed, "O", Vec3::X);
        assert!(bond(&mut ed, &a, &b).is_applied());
        let before = ed.buffer().clone();

        let _ = ed.execute(EditorCommand::SetMode(EditMode::DeleteAtom));
        let delete = EditorCommand::ClickAtom { atom_id: a.clone() };
        assert!(ed.execute(delete).is_applied());
        assert!(ed.bonds().is_empty());
        assert_eq!(ed.atoms()[&b].current_bonds, 0);

        assert!(ed.execute(EditorCommand::Undo).is_applied());
        assert_eq!(ed.buffer(), &before);
        assert_eq!(ed.bonds().len(), 1);
        assert!(ed.bonds()[0].connects(&a, &b));
        assert_eq!(ed.atoms()[&a].current_bonds, 1);
        assert_eq!(ed.atoms()[&b].current_bonds, 1);
    }

    #[test]
    fn delete_clears_selection() {
        let mut ed = editor();
        let a = place(&mut ed, "O", Vec3::ZERO);
        let _ = ed.execute(EditorCommand::SetMode(EditMode::Select));
        let _ = ed.execute(EditorCommand::ClickAtom { atom_id: a.clone() });
        assert_eq!(ed.selected_atom(), Some(a.as_str()));
        let _ = ed.execute(EditorCommand::SetMode(EditMode::DeleteAtom));
        let _ = ed.execute(EditorCommand::ClickAtom { atom_id: a });
        assert!(ed.selected_atom().is_none());
    }

    #[test]
    fn unknown_ids_are_rejected_without_mutation() {
        let mut ed = editor();
        let _ = place(&mut ed, "C", Vec3::ZERO);
        let before = ed.buffer().clone();
        let _ = ed.execute(EditorCommand::SetMode(EditMode::DeleteAtom));
        assert_eq!(
            ed.execute(EditorCommand::ClickAtom { atom_id: "ghost".into() }),
            EditOutcome::Rejected(ConstraintViolation::UnknownAtom("ghost".into()))
        );
        let _ = ed.execute(EditorCommand::SetMode(EditMode::BreakBond));
        assert_eq!(
            ed.execute(EditorCommand::ClickBond { bond_id: "ghost".into() }),
            EditOutcome::Rejected(ConstraintViolation::UnknownBond("ghost".into()))
        );
        assert_eq!(ed.buffer(), &before);
    }

    #[test]
    fn break_bond_only_removes_that_bond() {
        let mut ed = editor();
        let a = place(&mut ed, "C", Vec3::ZERO);
        let b = place(&mut ed, "C", Vec3::X);
        let _ = bond(&mut ed, &a, &b);
        let id = ed.bonds()[0].id.clone();
        let _ = ed.execute(EditorCommand::SetMode(EditMode::BreakBond));
        assert!(ed.execute(EditorCommand::ClickBond { bond_id: id }).is_applied());
        assert!(ed.bonds().is_empty());
        assert_eq!(ed.atoms().len(), 2);
        assert_eq!(ed.atoms()[&a].current_bonds, 0);
    }

    #[test]
    fn undo_reverts_most_recent_edit_of_either_kind() {
        let mut ed = editor();
        let a = place(&mut ed, "C", Vec3::ZERO);
        let b = place(&mut ed, "C", Vec3::X);
        let _ = bond(&mut ed, &a, &b);
        assert_eq!(ed.execute(EditorCommand::Undo), EditOutcome::Applied);
        assert!(ed.bonds().is_empty());
        assert_eq!(ed.atoms().len(), 2);
        assert_eq!(ed.atoms()[&a].current_bonds, 0);
        assert_eq!(ed.execute(EditorCommand::Undo), EditOutcome::Applied);
        assert_eq!(ed.atoms().len(), 1);
        let _ = ed.execute(EditorCommand::Undo);
        assert_eq!(ed.execute(EditorCommand::Undo), EditOutcome::NoOp);
        assert!(ed.buffer().is_empty());
    }

    #[test]
    fn move_and_charge() {
        let mut ed = editor();
        let na = place(&mut ed, "Na", Vec3::ZERO);
        let target = Vec3::new(1.0, 2.0, 3.0);
        let moved = ed.execute(EditorCommand::MoveAtom {
            atom_id: na.clone(),
            position: target,
        });
        assert!(moved.is_applied());
        assert_eq!(
            ed.execute(EditorCommand::MoveAtom {
                atom_id: na.clone(),
                position: target,
            }),
            EditOutcome::NoOp
        );
        let _ = ed.execute(EditorCommand::SetCharge {
            atom_id: na.clone(),
            charge: Some(1.0),
        });
        assert_eq!(ed.atoms()[&na].electrons, 10);
        let _ = ed.execute(EditorCommand::Undo);
        assert_eq!(ed.atoms()[&na].charge, Some(0.0));
        assert_eq!(ed.atoms()[&na].position, target);
    }

    #[test]
    fn molecule_placement_is_one_undo_step() {
        let mut ed = editor();
        let outcome = ed.execute(EditorCommand::PlaceMolecule {
            template: MoleculeTemplate::water(),
            center: Vec3::ZERO,
            rotation: Vec3::ZERO,
        });
        assert!(outcome.is_applied());
        assert_eq!(ed.atoms().len(), 3);
        assert_eq!(ed.bonds().len(), 2);
        let second = ed.execute(EditorCommand::PlaceMolecule {
            template: MoleculeTemplate::water(),
            center: Vec3::X * 5.0,
            rotation: Vec3::ZERO,
        });
        assert!(second.is_applied());
        assert_eq!(ed.atoms().len(), 6);
        let _ = ed.execute(EditorCommand::Undo);
        assert_eq!(ed.atoms().len(), 3);
    }

    #[test]
    fn keyframe_switch_loads_copy_and_clears_history() {
        let mut ed = editor();
        let o = place(&mut ed, "O", Vec3::ZERO);
        assert_eq!(ed.save_keyframe(), Ok(0));
        let _ = ed.execute(EditorCommand::MoveAtom {
            atom_id: o.clone(),
            position: Vec3::X,
        });
        assert_eq!(ed.save_keyframe(), Ok(1));

        ed.switch_keyframe(0).unwrap();
        assert_eq!(ed.atoms()[&o].position, Vec3::ZERO);
        assert!(!ed.can_undo());
        let _ = ed.execute(EditorCommand::MoveAtom {
            atom_id: o.clone(),
            position: Vec3::Y,
        });
        assert_eq!(ed.store().get_all()[0].atoms[&o].position, Vec3::ZERO);

        ed.switch_keyframe(2).unwrap();
        assert!(ed.buffer().is_empty());
        assert_eq!(ed.save_keyframe(), Err(ConstraintViolation::EmptyKeyframe));
        assert!(ed.switch_keyframe(3).is_err());
        assert_eq!(ed.store().cursor(), 2);
    }

    #[test]
    fn export_and_reload() {
        let mut ed = editor();
        let _ = ed.execute(EditorCommand::PlaceMolecule {
            template: MoleculeTemplate::hydrogen_chloride(),
            center: Vec3::ZERO,
            rotation: Vec3::ZERO,
        });
        let _ = ed.save_keyframe().unwrap();
        let _ = ed.save_keyframe().unwrap();
        let doc = ed
            .export(Metadata::default(), &ExportOptions::default())
            .unwrap();
        assert_eq!(doc.keyframes.len(), 2);
        assert!(doc.keyframes[0].bonds[0].id.starts_with("bond_"));

        let mut other = editor();
        other.load_document(doc).unwrap();
        assert_eq!(other.atoms().len(), 2);
        assert_eq!(other.store().cursor(), 0);
    }
}
