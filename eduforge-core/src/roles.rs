//! Generation role registry.
//!
//! The pipeline runs a fixed set of three roles, each a persona/goal pairing
//! that frames one category of generation request. Role definitions are
//! declarative data consumed by the request builder, not literals scattered
//! through call sites. No state, no inputs to validate.

use serde::{Deserialize, Serialize};

/// Identifies one of the three fixed generation roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    /// Learning Material Curator
    Materials,
    /// Quiz Creator
    Quiz,
    /// Project Advisor
    Projects,
}

impl RoleId {
    /// The fixed role order: materials, then quiz, then projects.
    /// Tracks are independent; this order is preserved for display only.
    pub const ALL: [RoleId; 3] = [RoleId::Materials, RoleId::Quiz, RoleId::Projects];
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleId::Materials => write!(f, "Learning Material Curator"),
            RoleId::Quiz => write!(f, "Quiz Creator"),
            RoleId::Projects => write!(f, "Project Advisor"),
        }
    }
}

/// A complete role profile: the persona framing sent with every request
/// this role makes to the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub id: RoleId,
    /// Short goal statement for the role.
    pub goal: String,
    /// Persona backstory establishing the role's expertise.
    pub backstory: String,
}

impl RoleProfile {
    /// Render the persona framing used as the system message.
    pub fn system_prompt(&self) -> String {
        format!("You are a {}. {} Your goal: {}", self.id, self.backstory, self.goal)
    }
}

/// The fixed registry of generation roles.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    profiles: Vec<RoleProfile>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            profiles: Vec::new(),
        };
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        self.profiles.push(RoleProfile {
            id: RoleId::Materials,
            goal: "Curate high-quality learning materials based on user topics and expertise level"
                .into(),
            backstory: concat!(
                "You are an expert educational content curator with years of experience ",
                "in finding the best learning resources for students at different levels. ",
                "You know how to identify reliable and high-quality educational content ",
                "from reputable sources."
            )
            .into(),
        });

        self.profiles.push(RoleProfile {
            id: RoleId::Quiz,
            goal: "Create engaging and educational quizzes to test understanding".into(),
            backstory: concat!(
                "You are an experienced educator who specializes in creating effective ",
                "assessment questions that test understanding while promoting learning."
            )
            .into(),
        });

        self.profiles.push(RoleProfile {
            id: RoleId::Projects,
            goal: "Suggest practical projects that match user expertise and interests".into(),
            backstory: concat!(
                "You are a project-based learning expert who knows how to create engaging ",
                "hands-on projects that reinforce learning objectives."
            )
            .into(),
        });
    }

    /// Look up the profile for a role. Every `RoleId` has a profile.
    pub fn profile(&self, id: RoleId) -> &RoleProfile {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .expect("all builtin roles are registered")
    }

    /// All profiles in the fixed role order.
    pub fn profiles(&self) -> impl Iterator<Item = &RoleProfile> {
        RoleId::ALL.iter().map(|id| self.profile(*id))
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
