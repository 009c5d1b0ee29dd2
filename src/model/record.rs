use std::fmt;

use super::types::{Dtype, ExternalMode, InterruptMode};

/// A named snapshot column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub dtype: Dtype,
}

impl Column {
    pub fn f64(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: Dtype::F64,
        }
    }

    pub fn i64(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: Dtype::I64,
        }
    }
}

/// Options that decide which optional columns a record carries.
///
/// These must match the options the snapshots were post-processed with;
/// for the schemaless formats (ascii, binary) a mismatch cannot be
/// detected and simply misreads the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleConfig {
    pub interrupt_mode: InterruptMode,
    pub external_mode: ExternalMode,
    /// Snapshots carry full physical binary orbital parameters.
    pub full_binary: bool,
}

/// Snapshot data type selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    Single,
    Binary,
    Triple,
    Quadruple,
}

impl SystemKind {
    /// File-name tag for this data type (`<base>.<tag>`).
    pub fn tag(self) -> &'static str {
        match self {
            SystemKind::Single => "single",
            SystemKind::Binary => "binary",
            SystemKind::Triple => "triple",
            SystemKind::Quadruple => "quadruple",
        }
    }

    /// Nested member layout of the record for this data type.
    pub fn shape(self) -> RecordShape {
        use RecordShape::Particle;
        match self {
            SystemKind::Single => Particle,
            SystemKind::Binary => RecordShape::pair(Particle, Particle),
            SystemKind::Triple => {
                RecordShape::pair(Particle, RecordShape::pair(Particle, Particle))
            }
            SystemKind::Quadruple => RecordShape::pair(
                RecordShape::pair(Particle, Particle),
                RecordShape::pair(Particle, Particle),
            ),
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Shape of a typed record: a flat particle, or a two-member system whose
/// members may themselves be two-member systems (triples and quadruples).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordShape {
    Particle,
    Pair(Box<RecordShape>, Box<RecordShape>),
}

impl RecordShape {
    pub fn pair(first: RecordShape, second: RecordShape) -> Self {
        RecordShape::Pair(Box::new(first), Box::new(second))
    }

    /// Flattened column layout of this record under `config`.
    ///
    /// A pair contributes its orbit block first, then the columns of its
    /// two members prefixed `p1.` and `p2.` (recursively, so a triple's
    /// inner pair yields `p2.p1.mass` and so on).
    pub fn columns(&self, config: &ParticleConfig) -> Vec<Column> {
        let mut out = Vec::new();
        self.append_columns("", config, &mut out);
        out
    }

    fn append_columns(&self, prefix: &str, config: &ParticleConfig, out: &mut Vec<Column>) {
        match self {
            RecordShape::Particle => particle_columns(prefix, config, out),
            RecordShape::Pair(first, second) => {
                orbit_columns(prefix, config, out);
                first.append_columns(&format!("{prefix}p1."), config, out);
                second.append_columns(&format!("{prefix}p2."), config, out);
            }
        }
    }
}

fn particle_columns(prefix: &str, config: &ParticleConfig, out: &mut Vec<Column>) {
    out.push(Column::i64(format!("{prefix}id")));
    out.push(Column::f64(format!("{prefix}mass")));
    for axis in ["x", "y", "z"] {
        out.push(Column::f64(format!("{prefix}pos.{axis}")));
    }
    for axis in ["x", "y", "z"] {
        out.push(Column::f64(format!("{prefix}vel.{axis}")));
    }

    match config.interrupt_mode {
        InterruptMode::None => {}
        InterruptMode::Base => {
            out.push(Column::i64(format!("{prefix}binary_state")));
        }
        InterruptMode::Bse | InterruptMode::Mobse => {
            out.push(Column::i64(format!("{prefix}binary_state")));
            out.push(Column::i64(format!("{prefix}star.type")));
            for name in [
                "mass0", "mass", "rad", "mcore", "rcore", "spin", "epoch", "time", "lum",
            ] {
                out.push(Column::f64(format!("{prefix}star.{name}")));
            }
        }
    }

    if config.external_mode == ExternalMode::Galpy {
        out.push(Column::f64(format!("{prefix}pot_ext")));
    }
}

fn orbit_columns(prefix: &str, config: &ParticleConfig, out: &mut Vec<Column>) {
    // Center-of-mass block, then the orbital elements.
    out.push(Column::f64(format!("{prefix}mass")));
    for axis in ["x", "y", "z"] {
        out.push(Column::f64(format!("{prefix}pos.{axis}")));
    }
    for axis in ["x", "y", "z"] {
        out.push(Column::f64(format!("{prefix}vel.{axis}")));
    }
    for name in ["m1", "m2", "semi", "ecc"] {
        out.push(Column::f64(format!("{prefix}{name}")));
    }

    if config.full_binary {
        for name in [
            "r",
            "am.x",
            "am.y",
            "am.z",
            "incline",
            "rot_horizon",
            "rot_self",
            "ecca",
            "t_peri",
            "period",
        ] {
            out.push(Column::f64(format!("{prefix}{name}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN_PARTICLE: usize = 8; // id, mass, pos xyz, vel xyz
    const SIMPLE_ORBIT: usize = 11; // com mass/pos/vel, m1, m2, semi, ecc
    const FULL_ORBIT: usize = 21;

    #[test]
    fn shapes_match_data_type_mapping() {
        use RecordShape::Particle;
        assert_eq!(SystemKind::Single.shape(), Particle);
        assert_eq!(
            SystemKind::Binary.shape(),
            RecordShape::pair(Particle, Particle)
        );
        assert_eq!(
            SystemKind::Triple.shape(),
            RecordShape::pair(Particle, RecordShape::pair(Particle, Particle))
        );
        assert_eq!(
            SystemKind::Quadruple.shape(),
            RecordShape::pair(
                RecordShape::pair(Particle, Particle),
                RecordShape::pair(Particle, Particle)
            )
        );
    }

    #[test]
    fn plain_particle_layout() {
        let config = ParticleConfig::default();
        let columns = SystemKind::Single.shape().columns(&config);
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "id", "mass", "pos.x", "pos.y", "pos.z", "vel.x", "vel.y", "vel.z"
            ]
        );
        assert_eq!(columns[0].dtype, Dtype::I64);
        assert!(columns[1..].iter().all(|c| c.dtype == Dtype::F64));
    }

    #[test]
    fn interrupt_modes_add_particle_columns() {
        let base = ParticleConfig {
            interrupt_mode: InterruptMode::Base,
            ..Default::default()
        };
        let columns = SystemKind::Single.shape().columns(&base);
        assert_eq!(columns.len(), PLAIN_PARTICLE + 1);
        assert_eq!(columns.last().unwrap().name, "binary_state");
        assert_eq!(columns.last().unwrap().dtype, Dtype::I64);

        for mode in [InterruptMode::Bse, InterruptMode::Mobse] {
            let config = ParticleConfig {
                interrupt_mode: mode,
                ..Default::default()
            };
            let columns = SystemKind::Single.shape().columns(&config);
            // binary_state + star.type + 9 stellar parameters
            assert_eq!(columns.len(), PLAIN_PARTICLE + 11);
            assert!(columns.iter().any(|c| c.name == "star.lum"));
        }
    }

    #[test]
    fn galpy_adds_external_potential() {
        let config = ParticleConfig {
            external_mode: ExternalMode::Galpy,
            ..Default::default()
        };
        let columns = SystemKind::Single.shape().columns(&config);
        assert_eq!(columns.len(), PLAIN_PARTICLE + 1);
        assert_eq!(columns.last().unwrap().name, "pot_ext");
        assert_eq!(columns.last().unwrap().dtype, Dtype::F64);
    }

    #[test]
    fn binary_layout_prefixes_members() {
        let config = ParticleConfig::default();
        let columns = SystemKind::Binary.shape().columns(&config);
        assert_eq!(columns.len(), SIMPLE_ORBIT + 2 * PLAIN_PARTICLE);
        assert_eq!(columns[0].name, "mass");
        assert_eq!(columns[SIMPLE_ORBIT].name, "p1.id");
        assert_eq!(columns[SIMPLE_ORBIT + PLAIN_PARTICLE].name, "p2.id");
    }

    #[test]
    fn full_binary_extends_every_orbit_block() {
        let config = ParticleConfig {
            full_binary: true,
            ..Default::default()
        };
        let columns = SystemKind::Binary.shape().columns(&config);
        assert_eq!(columns.len(), FULL_ORBIT + 2 * PLAIN_PARTICLE);
        assert!(columns.iter().any(|c| c.name == "t_peri"));

        // A triple has two orbit blocks: the outer one and the inner pair's.
        let columns = SystemKind::Triple.shape().columns(&config);
        assert_eq!(columns.len(), 2 * FULL_ORBIT + 3 * PLAIN_PARTICLE);
        assert!(columns.iter().any(|c| c.name == "p2.period"));
    }

    #[test]
    fn triple_and_quadruple_nest_prefixes() {
        let config = ParticleConfig::default();

        let triple = SystemKind::Triple.shape().columns(&config);
        assert_eq!(triple.len(), 2 * SIMPLE_ORBIT + 3 * PLAIN_PARTICLE);
        assert!(triple.iter().any(|c| c.name == "p2.p1.mass"));
        assert!(triple.iter().any(|c| c.name == "p2.semi"));

        let quadruple = SystemKind::Quadruple.shape().columns(&config);
        assert_eq!(quadruple.len(), 3 * SIMPLE_ORBIT + 4 * PLAIN_PARTICLE);
        assert!(quadruple.iter().any(|c| c.name == "p1.p2.vel.z"));
        assert!(quadruple.iter().any(|c| c.name == "p2.p2.id"));
    }

    #[test]
    fn tags_match_file_suffixes() {
        assert_eq!(SystemKind::Single.tag(), "single");
        assert_eq!(SystemKind::Binary.tag(), "binary");
        assert_eq!(SystemKind::Triple.tag(), "triple");
        assert_eq!(SystemKind::Quadruple.tag(), "quadruple");
    }
}
