use std::fmt;

/// The `@x` part of a target selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorBase {
    /// `@a`: all players.
    AllPlayers,
    /// `@p`: nearest player.
    NearestPlayer,
    /// `@s`: the executing entity.
    Executor,
    /// `@e`: all entities.
    AllEntities,
    /// `@r`: a random player.
    RandomPlayer,
}

impl SelectorBase {
    fn letter(self) -> char {
        match self {
            Self::AllPlayers => 'a',
            Self::NearestPlayer => 'p',
            Self::Executor => 's',
            Self::AllEntities => 'e',
            Self::RandomPlayer => 'r',
        }
    }
}

/// A target selector such as `@e[tag=boss,r=10]`.
///
/// Arguments are rendered in a fixed order regardless of the order the
/// builder methods were called in.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    base: SelectorBase,
    tags: Vec<String>,
    not_tags: Vec<String>,
    radius: Option<f64>,
    max_selected: Option<u32>,
    position: [Option<f64>; 3],
    volume: [Option<f64>; 3],
    rotation_x: Option<f64>,
    rotation_y: Option<f64>,
    level_min: Option<u32>,
    level_max: Option<u32>,
    gamemode: Option<String>,
    not_gamemode: Option<String>,
    name: Option<String>,
    not_names: Vec<String>,
    entity_type: Option<String>,
    not_entity_types: Vec<String>,
    families: Vec<String>,
    not_families: Vec<String>,
}

impl Selector {
    /// A bare selector with no arguments.
    pub fn new(base: SelectorBase) -> Self {
        Self {
            base,
            tags: Vec::new(),
            not_tags: Vec::new(),
            radius: None,
            max_selected: None,
            position: [None; 3],
            volume: [None; 3],
            rotation_x: None,
            rotation_y: None,
            level_min: None,
            level_max: None,
            gamemode: None,
            not_gamemode: None,
            name: None,
            not_names: Vec::new(),
            entity_type: None,
            not_entity_types: Vec::new(),
            families: Vec::new(),
            not_families: Vec::new(),
        }
    }

    /// Require a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Exclude a tag.
    pub fn not_tag(mut self, tag: impl Into<String>) -> Self {
        self.not_tags.push(tag.into());
        self
    }

    /// Maximum distance (`r`).
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Maximum number of targets (`c`).
    pub fn max_selected(mut self, count: u32) -> Self {
        self.max_selected = Some(count);
        self
    }

    /// Search origin (`x`, `y`, `z`).
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = [Some(x), Some(y), Some(z)];
        self
    }

    /// Search origin along one axis only.
    pub fn x(mut self, x: f64) -> Self {
        self.position[0] = Some(x);
        self
    }

    /// Search origin along one axis only.
    pub fn y(mut self, y: f64) -> Self {
        self.position[1] = Some(y);
        self
    }

    /// Search origin along one axis only.
    pub fn z(mut self, z: f64) -> Self {
        self.position[2] = Some(z);
        self
    }

    /// Search box extent (`dx`, `dy`, `dz`).
    pub fn volume(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.volume = [Some(dx), Some(dy), Some(dz)];
        self
    }

    /// Vertical rotation filter (`rx`).
    pub fn rotation_x(mut self, rx: f64) -> Self {
        self.rotation_x = Some(rx);
        self
    }

    /// Horizontal rotation filter (`ry`).
    pub fn rotation_y(mut self, ry: f64) -> Self {
        self.rotation_y = Some(ry);
        self
    }

    /// Minimum experience level (`lm`).
    pub fn level_min(mut self, level: u32) -> Self {
        self.level_min = Some(level);
        self
    }

    /// Maximum experience level (`l`).
    pub fn level_max(mut self, level: u32) -> Self {
        self.level_max = Some(level);
        self
    }

    /// Require a game mode (`m`).
    pub fn gamemode(mut self, mode: impl Into<String>) -> Self {
        self.gamemode = Some(mode.into());
        self
    }

    /// Exclude a game mode (`m=!`).
    pub fn not_gamemode(mut self, mode: impl Into<String>) -> Self {
        self.not_gamemode = Some(mode.into());
        self
    }

    /// Require a name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Exclude a name.
    pub fn not_name(mut self, name: impl Into<String>) -> Self {
        self.not_names.push(name.into());
        self
    }

    /// Require an entity type (`type`).
    pub fn entity_type(mut self, id: impl Into<String>) -> Self {
        self.entity_type = Some(id.into());
        self
    }

    /// Exclude an entity type.
    pub fn not_entity_type(mut self, id: impl Into<String>) -> Self {
        self.not_entity_types.push(id.into());
        self
    }

    /// Require a type family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.families.push(family.into());
        self
    }

    /// Exclude a type family.
    pub fn not_family(mut self, family: impl Into<String>) -> Self {
        self.not_families.push(family.into());
        self
    }

    fn arguments(&self) -> Vec<String> {
        let mut params = Vec::new();
        params.extend(self.tags.iter().map(|t| format!("tag={t}")));
        params.extend(self.not_tags.iter().map(|t| format!("tag=!{t}")));
        if let Some(r) = self.radius {
            params.push(format!("r={r}"));
        }
        if let Some(c) = self.max_selected {
            params.push(format!("c={c}"));
        }
        for (key, value) in ["x", "y", "z"].iter().zip(self.position) {
            if let Some(v) = value {
                params.push(format!("{key}={v}"));
            }
        }
        for (key, value) in ["dx", "dy", "dz"].iter().zip(self.volume) {
            if let Some(v) = value {
                params.push(format!("{key}={v}"));
            }
        }
        if let Some(rx) = self.rotation_x {
            params.push(format!("rx={rx}"));
        }
        if let Some(ry) = self.rotation_y {
            params.push(format!("ry={ry}"));
        }
        if let Some(lm) = self.level_min {
            params.push(format!("lm={lm}"));
        }
        if let Some(l) = self.level_max {
            params.push(format!("l={l}"));
        }
        if let Some(m) = &self.gamemode {
            params.push(format!("m={m}"));
        }
        if let Some(m) = &self.not_gamemode {
            params.push(format!("m=!{m}"));
        }
        if let Some(name) = &self.name {
            params.push(format!("name={name}"));
        }
        params.extend(self.not_names.iter().map(|n| format!("name=!{n}")));
        if let Some(t) = &self.entity_type {
            params.push(format!("type={t}"));
        }
        params.extend(self.not_entity_types.iter().map(|t| format!("type=!{t}")));
        params.extend(self.families.iter().map(|f| format!("family={f}")));
        params.extend(self.not_families.iter().map(|f| format!("family=!{f}")));
        params
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.base.letter())?;
        let params = self.arguments();
        if !params.is_empty() {
            write!(f, "[{}]", params.join(","))?;
        }
        Ok(())
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e() -> Selector {
        Selector::new(SelectorBase::AllEntities)
    }

    #[test]
    fn bare_selector() {
        assert_eq!(e().to_string(), "@e");
        assert_eq!(Selector::new(SelectorBase::Executor).to_string(), "@s");
    }

    #[test]
    fn multiple_tags() {
        let s = e().tag("tag1").tag("tag2").tag("tag3");
        assert_eq!(s.to_string(), "@e[tag=tag1,tag=tag2,tag=tag3]");
    }

    #[test]
    fn whole_numbers_render_without_decimals() {
        assert_eq!(e().radius(5.0).to_string(), "@e[r=5]");
        assert_eq!(e().radius(2.5).to_string(), "@e[r=2.5]");
        assert_eq!(e().x(1.0).to_string(), "@e[x=1]");
        assert_eq!(e().volume(1.0, 2.0, 3.0).to_string(), "@e[dx=1,dy=2,dz=3]");
    }

    #[test]
    fn levels_and_gamemodes() {
        assert_eq!(e().level_min(1).to_string(), "@e[lm=1]");
        assert_eq!(e().level_max(1).to_string(), "@e[l=1]");
        assert_eq!(e().not_gamemode("s").to_string(), "@e[m=!s]");
    }

    #[test]
    fn negated_lists() {
        let s = e().not_name("fido").not_name("spot").not_name("stinky");
        assert_eq!(s.to_string(), "@e[name=!fido,name=!spot,name=!stinky]");
        let s = e()
            .not_entity_type("custom:test_mob")
            .not_entity_type("custom:test_mob2");
        assert_eq!(s.to_string(), "@e[type=!custom:test_mob,type=!custom:test_mob2]");
        let s = e().family("mob").family("monster");
        assert_eq!(s.to_string(), "@e[family=mob,family=monster]");
    }

    #[test]
    fn arguments_follow_fixed_order() {
        let s = e().family("mob").radius(4.0).tag("boss");
        assert_eq!(s.to_string(), "@e[tag=boss,r=4,family=mob]");
    }
}
