//! Zone registry: owns the compiled zone table plus the shared year cache,
//! and performs eager link (alias) resolution at build time (§9).
//!
//! Grounded on AceTimePython's `InlineZoneInfo`/`ZoneManager`, which builds
//! its `ZONE_REGISTRY` from exactly the same three pieces this module takes:
//! a policy table, an era table per canonical zone, and a name -> target map
//! for links.

use std::sync::Arc;

use ahash::AHashMap;

use crate::calendar::year_of_seconds;
use crate::cache::TransitionCache;
use crate::error::{Error, Result};
use crate::model::{ActiveTransition, Ambiguity, ZoneEra, ZoneInfo};
use crate::query;
use crate::transitions::build_transitions_for_year;

/// One entry in the raw table passed to [`Registry::build`]: either a
/// canonical zone's own era history, or a pure alias naming its target.
pub enum ZoneSource {
    Eras(Vec<ZoneEra>),
    Link(String),
}

pub struct Registry {
    zones: AHashMap<String, Arc<ZoneInfo>>,
    cache: TransitionCache,
}

impl Registry {
    /// Build a registry from `(name, source)` pairs. Links are resolved
    /// eagerly here, following chains to their final canonical target, so
    /// every `ZoneInfo::link_target` a caller ever observes points directly
    /// at non-alias era data, never at another link.
    pub fn build(sources: Vec<(String, ZoneSource)>) -> Result<Registry> {
        let mut canonical: AHashMap<String, Arc<ZoneInfo>> = AHashMap::default();
        let mut link_targets: AHashMap<String, String> = AHashMap::default();

        for (name, source) in &sources {
            if let ZoneSource::Eras(eras) = source {
                canonical.insert(
                    name.clone(),
                    Arc::new(ZoneInfo {
                        name: name.clone(),
                        eras: eras.clone(),
                        link_target: None,
                    }),
                );
            }
        }
        for (name, source) in &sources {
            if let ZoneSource::Link(target) = source {
                link_targets.insert(name.clone(), target.clone());
            }
        }

        let mut zones = canonical.clone();
        for (name, _) in sources.iter().filter(|(_, s)| matches!(s, ZoneSource::Link(_))) {
            let resolved = resolve_link_chain(name, &link_targets, &canonical)?;
            zones.insert(
                name.clone(),
                Arc::new(ZoneInfo {
                    name: name.clone(),
                    eras: Vec::new(),
                    link_target: Some(resolved),
                }),
            );
        }

        Ok(Registry {
            zones,
            cache: TransitionCache::new(),
        })
    }

    pub fn get_zone(&self, name: &str) -> Result<ZoneHandle<'_>> {
        let info = self
            .zones
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(ZoneHandle {
            registry: self,
            info,
        })
    }
}

fn resolve_link_chain(
    name: &str,
    link_targets: &AHashMap<String, String>,
    canonical: &AHashMap<String, Arc<ZoneInfo>>,
) -> Result<Arc<ZoneInfo>> {
    let mut current = name.to_string();
    let mut seen = vec![current.clone()];
    loop {
        if let Some(info) = canonical.get(&current) {
            return Ok(Arc::clone(info));
        }
        match link_targets.get(&current) {
            Some(next) => {
                if seen.contains(next) {
                    return Err(Error::NotFound(name.to_string()));
                }
                seen.push(next.clone());
                current = next.clone();
            }
            None => return Err(Error::NotFound(name.to_string())),
        }
    }
}

/// A resolved handle on one named zone (canonical or link), borrowed from a
/// [`Registry`]. The query methods go through the registry's shared year
/// cache.
pub struct ZoneHandle<'a> {
    registry: &'a Registry,
    info: Arc<ZoneInfo>,
}

impl ZoneHandle<'_> {
    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn is_link(&self) -> bool {
        self.info.is_link()
    }

    pub fn canonical_name(&self) -> &str {
        self.info.canonical_name()
    }

    fn transitions_for_year(
        &self,
        year: crate::calendar::Year,
    ) -> Result<Arc<Vec<ActiveTransition>>> {
        let effective = self.info.effective();
        self.registry
            .cache
            .get_or_build(effective.canonical_name(), year, || {
                build_transitions_for_year(effective, year)
            })
    }

    pub fn info_for_epoch(&self, epoch_seconds: i64) -> Result<ActiveTransition> {
        let year = year_of_seconds(epoch_seconds);
        let transitions = self.transitions_for_year(year)?;
        query::info_for_epoch(&transitions, epoch_seconds)
    }

    pub fn info_for_local(&self, local_seconds: i64) -> Result<Ambiguity> {
        let year = year_of_seconds(local_seconds);
        let transitions = self.transitions_for_year(year)?;
        query::info_for_local(&transitions, local_seconds)
    }

    /// Convenience wrapper over [`Self::info_for_local`] taking civil
    /// date/time components directly (§4.5, §8 scenario literals), rather
    /// than pre-packed naive seconds. Returns the resolved transition plus
    /// the epoch instant it implies for this civil time.
    pub fn info_for_civil(
        &self,
        year: crate::calendar::Year,
        month: crate::calendar::Month,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        fold: u8,
    ) -> Result<(ActiveTransition, i64)> {
        let days = crate::calendar::days_from_epoch(year, month, day)?;
        let time_of_day = crate::calendar::seconds_of_day(hour, minute, second)?;
        let local_seconds = days.seconds_at(time_of_day);
        let ambiguity = self.info_for_local(local_seconds)?;
        let transition = query::resolve(ambiguity, fold);
        let epoch_seconds = local_seconds - transition.total_offset() as i64;
        Ok((transition, epoch_seconds))
    }
}
