//! Script-wide dataflow state, rebuilt from scratch on every analysis pass.
//! Cross-line facts (unread flags, unbalanced conditions, duplicate parties)
//! need the whole document, so nothing here survives between passes.

use indexmap::IndexMap;

use crate::diagnostics::Diagnostic;

/// A party may not grow past this without any deletion in the script.
pub const MAX_PARTY_MEMBERS: usize = 7;

/// Quick-message slot numbers live in this inclusive range.
pub const MAX_MESSAGE_SLOT: i64 = 50;

/// A single usage site: line plus column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarClass {
    Flag,
    Timer,
}

/// Key for one tracked variable: class plus owning player plus name, all
/// uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarKey {
    pub class: VarClass,
    pub player: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct VarLog {
    pub reads: Vec<Site>,
    pub writes: Vec<Site>,
}

#[derive(Debug, Clone, Default)]
pub struct ActionPointLog {
    pub triggers: Vec<Site>,
    pub resets: Vec<Site>,
}

#[derive(Debug, Clone)]
pub struct PartyLog {
    pub declared: Site,
    pub adds: usize,
    pub reads: usize,
    pub deletes: usize,
    /// Every mention of the party name, in document order.
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionFrame {
    pub site: Site,
}

#[derive(Debug, Default)]
pub struct ScriptState {
    conditions: Vec<ConditionFrame>,
    pending_reuse: Option<Site>,
    vars: IndexMap<VarKey, VarLog>,
    action_points: IndexMap<i64, ActionPointLog>,
    message_slots: IndexMap<i64, Vec<Site>>,
    parties: IndexMap<String, PartyLog>,
    versions: Vec<Site>,
    wins: usize,
}

impl ScriptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root level means no open condition block.
    pub fn at_root(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn open_condition(&mut self, site: Site) {
        self.conditions.push(ConditionFrame { site });
    }

    /// Returns the matching opener, or `None` when there is nothing to
    /// close (the caller reports that).
    pub fn close_condition(&mut self) -> Option<ConditionFrame> {
        self.conditions.pop()
    }

    pub fn set_reuse_marker(&mut self, site: Site) {
        self.pending_reuse = Some(site);
    }

    pub fn take_reuse_marker(&mut self) -> Option<Site> {
        self.pending_reuse.take()
    }

    pub fn record_read(&mut self, key: VarKey, site: Site) {
        self.vars.entry(key).or_default().reads.push(site);
    }

    pub fn record_write(&mut self, key: VarKey, site: Site) {
        self.vars.entry(key).or_default().writes.push(site);
    }

    pub fn record_trigger(&mut self, point: i64, site: Site) {
        self.action_points
            .entry(point)
            .or_default()
            .triggers
            .push(site);
    }

    pub fn record_reset(&mut self, point: i64, site: Site) {
        self.action_points
            .entry(point)
            .or_default()
            .resets
            .push(site);
    }

    /// Occupies a message slot; `false` when the slot already had an
    /// occupant (an error at this site).
    pub fn occupy_message_slot(&mut self, slot: i64, site: Site) -> bool {
        let occupants = self.message_slots.entry(slot).or_default();
        occupants.push(site);
        occupants.len() == 1
    }

    /// Declares a party; `false` when the name is already taken. The site
    /// is recorded as a mention either way.
    pub fn declare_party(&mut self, name: &str, site: Site) -> bool {
        let key = name.to_ascii_uppercase();
        if let Some(log) = self.parties.get_mut(&key) {
            log.sites.push(site);
            return false;
        }
        self.parties.insert(
            key,
            PartyLog {
                declared: site,
                adds: 0,
                reads: 0,
                deletes: 0,
                sites: vec![site],
            },
        );
        true
    }

    pub fn party_declared(&self, name: &str) -> bool {
        self.parties.contains_key(&name.to_ascii_uppercase())
    }

    pub fn party_names(&self) -> impl Iterator<Item = &str> {
        self.parties.keys().map(String::as_str)
    }

    pub fn record_party_add(&mut self, name: &str, site: Site) {
        if let Some(log) = self.parties.get_mut(&name.to_ascii_uppercase()) {
            log.adds += 1;
            log.sites.push(site);
        }
    }

    pub fn record_party_read(&mut self, name: &str, site: Site) {
        if let Some(log) = self.parties.get_mut(&name.to_ascii_uppercase()) {
            log.reads += 1;
            log.sites.push(site);
        }
    }

    pub fn record_party_delete(&mut self, name: &str, site: Site) {
        if let Some(log) = self.parties.get_mut(&name.to_ascii_uppercase()) {
            log.deletes += 1;
            log.sites.push(site);
        }
    }

    /// Every recorded mention of one tracked variable, reads and writes
    /// together, in document order.
    pub fn var_sites(&self, key: &VarKey) -> Vec<Site> {
        let Some(log) = self.vars.get(key) else {
            return Vec::new();
        };
        let mut sites: Vec<Site> = log.reads.iter().chain(&log.writes).copied().collect();
        sites.sort_by_key(|s| (s.line, s.start));
        sites
    }

    /// Every trigger and reset of one action point, in document order.
    pub fn action_point_sites(&self, point: i64) -> Vec<Site> {
        let Some(log) = self.action_points.get(&point) else {
            return Vec::new();
        };
        let mut sites: Vec<Site> = log.triggers.iter().chain(&log.resets).copied().collect();
        sites.sort_by_key(|s| (s.line, s.start));
        sites
    }

    pub fn party_sites(&self, name: &str) -> Vec<Site> {
        self.parties
            .get(&name.to_ascii_uppercase())
            .map(|log| log.sites.clone())
            .unwrap_or_default()
    }

    /// Records a version event; `false` from the second event on.
    pub fn record_version(&mut self, site: Site) -> bool {
        self.versions.push(site);
        self.versions.len() == 1
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    /// Closing diagnostics for the whole document, produced exactly once at
    /// the end of an analysis pass.
    pub fn finalize(&self, diagnostics: &mut Vec<Diagnostic>) {
        for frame in &self.conditions {
            let s = frame.site;
            diagnostics.push(Diagnostic::error(
                s.line,
                s.start,
                s.end,
                "condition is never terminated; ENDIF expected before end of script",
            ));
        }

        if let Some(site) = self.pending_reuse {
            diagnostics.push(Diagnostic::error(
                site.line,
                site.start,
                site.end,
                "nothing to reuse; NEXT_COMMAND_REUSABLE must be followed by a command",
            ));
        }

        for (key, log) in &self.vars {
            let class = match key.class {
                VarClass::Flag => "flag",
                VarClass::Timer => "timer",
            };
            if log.reads.is_empty() {
                if let Some(first) = log.writes.first() {
                    diagnostics.push(Diagnostic::warning(
                        first.line,
                        first.start,
                        first.end,
                        format!("{} {} of {} is set but never read", class, key.name, key.player),
                    ));
                }
            } else if log.writes.is_empty() {
                if let Some(first) = log.reads.first() {
                    diagnostics.push(Diagnostic::warning(
                        first.line,
                        first.start,
                        first.end,
                        format!("{} {} of {} is read but never set", class, key.name, key.player),
                    ));
                }
            }
        }

        for (point, log) in &self.action_points {
            if log.triggers.is_empty() {
                if let Some(first) = log.resets.first() {
                    diagnostics.push(Diagnostic::warning(
                        first.line,
                        first.start,
                        first.end,
                        format!("action point {point} is reset but never triggered"),
                    ));
                }
            }
        }

        for (name, log) in &self.parties {
            let s = log.declared;
            if log.adds == 0 {
                diagnostics.push(Diagnostic::warning(
                    s.line,
                    s.start,
                    s.end,
                    format!("party {name} never gets any members"),
                ));
            }
            if log.reads == 0 {
                diagnostics.push(Diagnostic::warning(
                    s.line,
                    s.start,
                    s.end,
                    format!("party {name} is never added to the level"),
                ));
            }
            if log.adds > MAX_PARTY_MEMBERS && log.deletes == 0 {
                diagnostics.push(Diagnostic::error(
                    s.line,
                    s.start,
                    s.end,
                    format!(
                        "party {name} gets {} members; at most {MAX_PARTY_MEMBERS} fit",
                        log.adds
                    ),
                ));
            }
        }

        if self.versions.is_empty() {
            diagnostics.push(Diagnostic::warning(
                0,
                0,
                0,
                "script never declares LEVEL_VERSION",
            ));
        }
        if self.wins == 0 {
            diagnostics.push(Diagnostic::warning(
                0,
                0,
                0,
                "script has no way to win; WIN_GAME never appears",
            ));
        }
    }
}
