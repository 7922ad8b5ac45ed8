//! Static content catalog: the five eras of medical-device innovation and
//! the achievement roster.
//!
//! The catalog is read-only input to the engine — nothing here is mutated at
//! runtime. Eras are strictly ordered (`order` is 1-based with no gaps) and
//! the unlock policy leans on that ordering. Icons, colors, and categories
//! are closed enums resolved through explicit mapping functions, so an
//! unknown key is a compile error rather than a silent fallback.

use crate::achievements::{
    AchievementCategory, AchievementCondition, AchievementDescriptor, ChoiceBucket,
};

/// Icon identifiers used by era and achievement badges.
///
/// The presentation layer maps these onto its icon set via [`Icon::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Microscope,
    Zap,
    Bot,
    Watch,
    Dna,
    Award,
    TrendingUp,
    Trophy,
    Target,
    Shield,
    Lightbulb,
    Scale,
    Compass,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Microscope => "Microscope",
            Icon::Zap => "Zap",
            Icon::Bot => "Bot",
            Icon::Watch => "Watch",
            Icon::Dna => "Dna",
            Icon::Award => "Award",
            Icon::TrendingUp => "TrendingUp",
            Icon::Trophy => "Trophy",
            Icon::Target => "Target",
            Icon::Shield => "Shield",
            Icon::Lightbulb => "Lightbulb",
            Icon::Scale => "Scale",
            Icon::Compass => "Compass",
        }
    }
}

/// Accent color assigned to an era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraColor {
    Cyan,
    Purple,
    Teal,
}

impl EraColor {
    pub fn name(&self) -> &'static str {
        match self {
            EraColor::Cyan => "cyan",
            EraColor::Purple => "purple",
            EraColor::Teal => "teal",
        }
    }
}

/// The three kinds of interactive mission puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    /// Arrange items into the correct order.
    Sequence,
    /// Settle a slider inside a target range.
    Slider,
    /// Pick one of several scenario options.
    Choice,
}

impl MissionKind {
    pub fn name(&self) -> &'static str {
        match self {
            MissionKind::Sequence => "sequence",
            MissionKind::Slider => "slider",
            MissionKind::Choice => "choice",
        }
    }
}

/// Device categories across all eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    Diagnostic,
    Therapeutic,
    Monitoring,
    Surgical,
    Imaging,
}

impl DeviceCategory {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceCategory::Diagnostic => "diagnostic",
            DeviceCategory::Therapeutic => "therapeutic",
            DeviceCategory::Monitoring => "monitoring",
            DeviceCategory::Surgical => "surgical",
            DeviceCategory::Imaging => "imaging",
        }
    }
}

/// A device featured within an era.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub category: DeviceCategory,
    pub tagline: String,
}

impl Device {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DeviceCategory,
        tagline: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            tagline: tagline.into(),
        }
    }
}

/// An era's interactive mission puzzle.
#[derive(Debug, Clone)]
pub struct Mission {
    pub kind: MissionKind,
    pub title: String,
}

impl Mission {
    pub fn new(kind: MissionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
        }
    }
}

/// One answer to an era's ethical question.
#[derive(Debug, Clone)]
pub struct EthicalChoice {
    pub id: String,
    pub text: String,
}

impl EthicalChoice {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The required single-answer reflection question for an era.
#[derive(Debug, Clone)]
pub struct EthicalQuestion {
    pub question: String,
    pub choices: Vec<EthicalChoice>,
}

impl EthicalQuestion {
    pub fn new(question: impl Into<String>, choices: Vec<EthicalChoice>) -> Self {
        Self {
            question: question.into(),
            choices,
        }
    }
}

/// A top-level content unit: one historical era of device innovation.
#[derive(Debug, Clone)]
pub struct EraDescriptor {
    pub id: String,
    pub name: String,
    /// 1-based position in the strict linear progression.
    pub order: u32,
    pub icon: Icon,
    pub color: EraColor,
    pub intro: String,
    pub mission: Mission,
    pub ethical_question: EthicalQuestion,
    pub devices: Vec<Device>,
}

impl EraDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        order: u32,
        icon: Icon,
        color: EraColor,
        mission: Mission,
        ethical_question: EthicalQuestion,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            icon,
            color,
            intro: String::new(),
            mission,
            ethical_question,
            devices: Vec::new(),
        }
    }

    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }
}

// ============================================================================
// Eras
// ============================================================================

lazy_static::lazy_static! {
    /// The five eras, in unlock order.
    pub static ref ERAS: Vec<EraDescriptor> = vec![
        EraDescriptor::new(
            "foundations",
            "Foundations Era",
            1,
            Icon::Microscope,
            EraColor::Cyan,
            Mission::new(MissionKind::Sequence, "Device Development Pipeline"),
            EthicalQuestion::new(
                "Early X-ray machines exposed operators to harmful radiation. Would you:",
                vec![
                    EthicalChoice::new("safety", "Pause deployment until operator safety is ensured"),
                    EthicalChoice::new("proceed", "Proceed cautiously with warnings, learning from real-world use"),
                    EthicalChoice::new("restrict", "Restrict use to life-threatening cases only"),
                ],
            ),
        )
        .with_intro("The dawn of modern medicine, where curious minds wielded simple tools to peer into the human body for the first time.")
        .with_devices(vec![
            Device::new("stethoscope", "Stethoscope", DeviceCategory::Diagnostic, "The physician's ears, amplified"),
            Device::new("xray", "X-Ray Machine", DeviceCategory::Imaging, "Seeing through skin and bone"),
            Device::new("thermometer", "Clinical Thermometer", DeviceCategory::Diagnostic, "Fever's silent witness"),
            Device::new("sphygmomanometer", "Blood Pressure Cuff", DeviceCategory::Diagnostic, "Measuring life's pressure"),
            Device::new("pharmaceutical-analyzer", "Pharmaceutical Analytical Testing (UPLC/HPLC)", DeviceCategory::Diagnostic, "Molecular precision for drug development"),
        ]),

        EraDescriptor::new(
            "implantables",
            "Implantables Era",
            2,
            Icon::Zap,
            EraColor::Purple,
            Mission::new(MissionKind::Slider, "Pacemaker Rate Optimization"),
            EthicalQuestion::new(
                "A pacemaker's battery lasts 7-10 years, requiring replacement surgery. Would you:",
                vec![
                    EthicalChoice::new("longer-battery", "Prioritize longer battery life (bulkier device)"),
                    EthicalChoice::new("smaller-device", "Prioritize smaller size (shorter battery life)"),
                    EthicalChoice::new("wireless-charging", "Develop wireless charging technology"),
                ],
            ),
        )
        .with_intro("When devices crossed the threshold, from external tools to internal life-support systems embedded within the body itself.")
        .with_devices(vec![
            Device::new("pacemaker", "Cardiac Pacemaker", DeviceCategory::Therapeutic, "The heart's electric guardian"),
            Device::new("hip-implant", "Hip Replacement", DeviceCategory::Surgical, "Restoring mobility through engineering"),
            Device::new("cochlear", "Cochlear Implant", DeviceCategory::Therapeutic, "Sound through electric signals"),
            Device::new("icd", "Implantable Defibrillator (ICD)", DeviceCategory::Therapeutic, "Lifesaving shock on demand"),
        ]),

        EraDescriptor::new(
            "imaging-robotics",
            "Imaging & Robotics Era",
            3,
            Icon::Bot,
            EraColor::Teal,
            Mission::new(MissionKind::Choice, "Surgical Precision vs. Cost"),
            EthicalQuestion::new(
                "MRI scans are expensive and time-consuming. A patient with vague symptoms requests one. Would you:",
                vec![
                    EthicalChoice::new("scan", "Approve the scan to rule out serious conditions"),
                    EthicalChoice::new("wait", "Recommend watchful waiting and clinical exam first"),
                    EthicalChoice::new("protocol", "Follow evidence-based clinical guidelines strictly"),
                ],
            ),
        )
        .with_intro("Precision beyond human limits, where robots assisted surgeons and imaging revealed the body in stunning detail.")
        .with_devices(vec![
            Device::new("mri", "MRI Scanner", DeviceCategory::Imaging, "Magnetic resonance illuminates soft tissue"),
            Device::new("surgical-robot", "Surgical Robot", DeviceCategory::Surgical, "The surgeon's precision, amplified"),
            Device::new("endoscope", "Flexible Endoscope", DeviceCategory::Diagnostic, "Eyes inside the body"),
            Device::new("ct-scanner", "CT Scanner", DeviceCategory::Imaging, "3D slices of internal anatomy"),
        ]),

        EraDescriptor::new(
            "wearables",
            "Wearables & Home Monitoring Era",
            4,
            Icon::Watch,
            EraColor::Cyan,
            Mission::new(MissionKind::Slider, "Insulin Dosing Challenge"),
            EthicalQuestion::new(
                "Your CGM data shows you're managing diabetes well. Your insurer requests access to reduce premiums. Would you:",
                vec![
                    EthicalChoice::new("share", "Share data for lower premiums"),
                    EthicalChoice::new("refuse", "Refuse to protect privacy"),
                    EthicalChoice::new("aggregate", "Share anonymized, aggregate data only"),
                ],
            ),
        )
        .with_intro("Medicine leaves the clinic; devices became smaller, smarter, and followed patients into daily life.")
        .with_devices(vec![
            Device::new("cgm", "Continuous Glucose Monitor", DeviceCategory::Monitoring, "Real-time glucose awareness"),
            Device::new("insulin-pump", "Insulet Omnipod\u{ae} Insulin Pump", DeviceCategory::Therapeutic, "Tubeless automated insulin delivery"),
            Device::new("smart-inhaler", "Smart Inhaler", DeviceCategory::Therapeutic, "Breathing assistance, tracked and optimized"),
            Device::new("fitness-tracker", "Fitness Tracker", DeviceCategory::Monitoring, "24/7 activity and health monitoring"),
        ]),

        EraDescriptor::new(
            "ai-future",
            "AI & Future Era",
            5,
            Icon::Dna,
            EraColor::Purple,
            Mission::new(MissionKind::Choice, "AI Transparency vs. Performance"),
            EthicalQuestion::new(
                "A closed-loop insulin system learns from your patterns but requires sharing data with the manufacturer's cloud. Would you:",
                vec![
                    EthicalChoice::new("cloud", "Accept cloud processing for better algorithms"),
                    EthicalChoice::new("local", "Demand local-only processing"),
                    EthicalChoice::new("federated", "Advocate for federated learning (local training, shared insights)"),
                ],
            ),
        )
        .with_intro("The frontier of possibility, where artificial intelligence meets biology and devices not only assist but predict, learn, and adapt.")
        .with_devices(vec![
            Device::new("ai-diagnosis", "AI Diagnostic Assistant & EHR Integration", DeviceCategory::Diagnostic, "Pattern recognition meets clinical workflow"),
            Device::new("closed-loop", "Closed-Loop Artificial Pancreas", DeviceCategory::Therapeutic, "The body's feedback loop, engineered"),
            Device::new("neural-interface", "Neural Interface (Speculative)", DeviceCategory::Therapeutic, "Direct brain-computer communication"),
            Device::new("wound-healing-therapy", "PDGFR-Enhanced Cell Therapy for Wound Healing", DeviceCategory::Therapeutic, "Accelerating tissue regeneration at the cellular level"),
            Device::new("nano-robot", "Medical Nanorobot (Speculative)", DeviceCategory::Therapeutic, "Microscopic surgeons"),
        ]),
    ];

    /// The full achievement roster.
    pub static ref ACHIEVEMENTS: Vec<AchievementDescriptor> = vec![
        AchievementDescriptor::new(
            "first-steps",
            "First Steps",
            "Complete your first era",
            Icon::Award,
            AchievementCategory::Completion,
            AchievementCondition::ErasCompleted { at_least: 1 },
        ),
        AchievementDescriptor::new(
            "halfway-there",
            "Halfway There",
            "Complete 3 eras",
            Icon::TrendingUp,
            AchievementCategory::Completion,
            AchievementCondition::ErasCompleted { at_least: 3 },
        ),
        AchievementDescriptor::new(
            "master-chronicler",
            "Master Chronicler",
            "Complete all 5 eras",
            Icon::Trophy,
            AchievementCategory::Completion,
            AchievementCondition::ErasCompleted { at_least: 5 },
        ),
        AchievementDescriptor::new(
            "perfect-sequence",
            "Perfect Sequencer",
            "Complete a sequencing puzzle on first attempt",
            Icon::Target,
            AchievementCategory::Speed,
            AchievementCondition::FirstAttemptMission {
                mission: MissionKind::Sequence,
            },
        ),
        AchievementDescriptor::new(
            "quick-learner",
            "Quick Learner",
            "Complete an era within 5 minutes of starting it",
            Icon::Zap,
            AchievementCategory::Speed,
            AchievementCondition::CompletionWithin { max_ms: 300_000 },
        ),
        AchievementDescriptor::new(
            "safety-first",
            "Safety First",
            "Choose safety-focused ethical options in 3 eras",
            Icon::Shield,
            AchievementCategory::Ethics,
            AchievementCondition::ChoicesInBucket {
                bucket: ChoiceBucket::Safety,
                at_least: 3,
            },
        ),
        AchievementDescriptor::new(
            "innovation-advocate",
            "Innovation Advocate",
            "Choose innovation-focused options in 3 eras",
            Icon::Lightbulb,
            AchievementCategory::Ethics,
            AchievementCondition::ChoicesInBucket {
                bucket: ChoiceBucket::Innovation,
                at_least: 3,
            },
        ),
        AchievementDescriptor::new(
            "balanced-thinker",
            "Balanced Thinker",
            "Choose middle-ground options in 3 eras",
            Icon::Scale,
            AchievementCategory::Ethics,
            AchievementCondition::ChoicesInBucket {
                bucket: ChoiceBucket::Balanced,
                at_least: 3,
            },
        ),
        AchievementDescriptor::new(
            "explorer",
            "Explorer",
            "Visit all available eras",
            Icon::Compass,
            AchievementCategory::Special,
            AchievementCondition::VisitedCoverage { min_unlocked: 3 },
        ),
    ];
}

/// All eras in unlock order.
pub fn eras() -> &'static [EraDescriptor] {
    &ERAS
}

/// All achievement descriptors.
pub fn achievements() -> &'static [AchievementDescriptor] {
    &ACHIEVEMENTS
}

/// Look up an era by id.
pub fn era(era_id: &str) -> Option<&'static EraDescriptor> {
    ERAS.iter().find(|e| e.id == era_id)
}
