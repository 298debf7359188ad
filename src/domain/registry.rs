//! Material Registry - read-only property lookup plus hook binding
//!
//! Built from the compiled-in table or from a JSON bundle that overrides the
//! physical properties. Either way the definition set is checked for
//! completeness up front, so per-call lookups never fail.

use log::info;
use serde::{Deserialize, Serialize};

use crate::behaviors::{hooks_for, MaterialHooks};
use crate::error::RegistryError;

use super::color::Rgba;
use super::materials::{MaterialDef, MaterialId, StateTier, BUILTIN_MATERIALS};

#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    defs: Vec<MaterialDef>,
}

/// One palette entry for the material picker
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: u8,
    pub key: &'static str,
    pub display_name: &'static str,
    pub color: Rgba,
}

impl MaterialRegistry {
    pub fn builtin() -> Self {
        Self {
            defs: BUILTIN_MATERIALS.to_vec(),
        }
    }

    /// Build from an arbitrary definition list. Every placeable material must
    /// appear exactly once; `Empty` is always taken from the built-in table.
    pub fn from_definitions(defs: Vec<MaterialDef>) -> Result<Self, RegistryError> {
        let mut slots: Vec<Option<MaterialDef>> = vec![None; MaterialId::COUNT];
        slots[MaterialId::Empty.index()] = Some(BUILTIN_MATERIALS[MaterialId::Empty.index()]);

        for def in defs {
            if !def.id.is_placeable() {
                return Err(RegistryError::ReservedMaterial(def.id.key().to_string()));
            }
            validate_def(&def)?;
            let slot = &mut slots[def.id.index()];
            if slot.is_some() {
                return Err(RegistryError::DuplicateMaterial(def.id.key()));
            }
            *slot = Some(def);
        }

        let mut out = Vec::with_capacity(MaterialId::COUNT);
        for (idx, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(def) => out.push(def),
                None => {
                    let id = MaterialId::ALL[idx];
                    return Err(RegistryError::MissingMaterial(id.key()));
                }
            }
        }

        Ok(Self { defs: out })
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, RegistryError> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        let mut defs = Vec::with_capacity(bundle.materials.len());
        for m in bundle.materials {
            let id = MaterialId::from_key(&m.key)
                .ok_or_else(|| RegistryError::UnknownMaterial(m.key.clone()))?;
            if !id.is_placeable() {
                return Err(RegistryError::ReservedMaterial(m.key));
            }
            defs.push(MaterialDef {
                id,
                tier: m.tier,
                mass: m.mass,
                friction: m.friction,
                repose_angle: m.repose_angle,
                flammable: m.flammable,
                dispersion: m.dispersion,
                color: m.color,
                grain: m.grain,
            });
        }
        let registry = Self::from_definitions(defs)?;
        info!("loaded material bundle v{} ({} materials)", bundle.format_version, registry.defs.len() - 1);
        Ok(registry)
    }

    /// All definitions, indexed by id (including `Empty`)
    pub fn definitions(&self) -> &[MaterialDef] {
        &self.defs
    }

    #[inline]
    pub fn properties(&self, id: MaterialId) -> &MaterialDef {
        &self.defs[id.index()]
    }

    #[inline]
    pub fn tier(&self, id: MaterialId) -> StateTier {
        self.defs[id.index()].tier
    }

    #[inline]
    pub fn hooks(&self, id: MaterialId) -> &'static MaterialHooks {
        hooks_for(id)
    }

    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.defs
            .iter()
            .filter(|d| d.id.is_placeable())
            .map(|d| PaletteEntry {
                id: d.id as u8,
                key: d.id.key(),
                display_name: d.id.display_name(),
                color: d.color,
            })
            .collect()
    }

    pub fn manifest_json(&self) -> String {
        let out = Manifest {
            format_version: 1,
            materials: self.palette(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_def(def: &MaterialDef) -> Result<(), RegistryError> {
    let key = def.id.key();
    let check = |field: &'static str, value: f32, ok: bool| {
        if ok {
            Ok(())
        } else {
            Err(RegistryError::InvalidProperty { material: key, field, value })
        }
    };
    check("mass", def.mass, def.mass.is_finite())?;
    check("friction", def.friction, (0.0..=1.0).contains(&def.friction))?;
    check("reposeAngle", def.repose_angle, (0.0..=90.0).contains(&def.repose_angle))?;
    check("dispersion", def.dispersion, (0.0..=1.0).contains(&def.dispersion))?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    format_version: u32,
    materials: Vec<PaletteEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    #[serde(default = "default_format_version")]
    format_version: u32,
    materials: Vec<BundleMaterial>,
}

fn default_format_version() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleMaterial {
    key: String,
    tier: StateTier,
    #[serde(default)]
    mass: f32,
    #[serde(default)]
    friction: f32,
    #[serde(default = "default_repose")]
    repose_angle: f32,
    #[serde(default)]
    flammable: bool,
    #[serde(default)]
    dispersion: f32,
    color: Rgba,
    #[serde(default)]
    grain: u8,
}

fn default_repose() -> f32 {
    90.0
}
