use super::domain::{Gender, Goal};

const BASE_CALORIES: u32 = 2000;
const FEMALE_BASE_CALORIES: u32 = 1800;

/// Fixed workout prescription for a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutTemplate {
    pub schedule: &'static str,
    pub focus: &'static str,
    pub exercises: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroTemplate {
    pub protein: &'static str,
    pub carbs: &'static str,
    pub fats: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealTemplate {
    pub breakfast: &'static str,
    pub lunch: &'static str,
    pub dinner: &'static str,
    pub snack: &'static str,
}

/// Nutrition targets with the calorie figure already adjusted for gender and goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutritionTemplate {
    pub calories: u32,
    pub macros: MacroTemplate,
    pub meals: MealTemplate,
}

const GENERAL_FITNESS: WorkoutTemplate = WorkoutTemplate {
    schedule: "3 days/week",
    focus: "General Fitness",
    exercises: &["Squats", "Pushups", "Plank"],
};

const FAT_LOSS: WorkoutTemplate = WorkoutTemplate {
    schedule: "4-5 days/week",
    focus: "High Intensity Interval Training (HIIT) + Cardio",
    exercises: &["Burpees", "Mountain Climbers", "Jump Rope", "Sprints"],
};

const HYPERTROPHY: WorkoutTemplate = WorkoutTemplate {
    schedule: "4-5 days/week",
    focus: "Hypertrophy & Strength",
    exercises: &["Deadlifts", "Bench Press", "Squats", "Overhead Press"],
};

const CARDIO_BASE: WorkoutTemplate = WorkoutTemplate {
    schedule: "5-6 days/week",
    focus: "Cardiovascular Endurance",
    exercises: &["Long Run", "Cycling", "Swimming", "Tempo Run"],
};

const BALANCED_MACROS: MacroTemplate = MacroTemplate {
    protein: "150g",
    carbs: "200g",
    fats: "65g",
};

const BALANCED_MEALS: MealTemplate = MealTemplate {
    breakfast: "Oatmeal with whey protein and berries",
    lunch: "Grilled chicken breast with quinoa and broccoli",
    dinner: "Baked salmon with sweet potato and asparagus",
    snack: "Greek yogurt with almonds",
};

const DEFICIT_MACROS: MacroTemplate = MacroTemplate {
    protein: "180g",
    carbs: "120g",
    fats: "60g",
};

const DEFICIT_MEALS: MealTemplate = MealTemplate {
    breakfast: "Egg white omelet with spinach and mushrooms",
    lunch: "Tuna salad with mixed greens and olive oil dressing",
    dinner: "Lean turkey meatballs with zucchini noodles",
    snack: "Celery sticks with almond butter",
};

const SURPLUS_MACROS: MacroTemplate = MacroTemplate {
    protein: "220g",
    carbs: "350g",
    fats: "80g",
};

const SURPLUS_MEALS: MealTemplate = MealTemplate {
    breakfast: "3 whole eggs, oatmeal with banana and peanut butter",
    lunch: "Steak burrito bowl with brown rice, black beans, and avocado",
    dinner: "Chicken pasta with marinara sauce and parmesan",
    snack: "Protein shake and a bagel with cream cheese",
};

const CARB_LOADED_MACROS: MacroTemplate = MacroTemplate {
    protein: "140g",
    carbs: "400g",
    fats: "60g",
};

const CARB_LOADED_MEALS: MealTemplate = MealTemplate {
    breakfast: "Bagel with jam and a side of fruit",
    lunch: "Pasta salad with grilled chicken and light vinaigrette",
    dinner: "Rice bowl with tofu and stir-fried vegetables",
    snack: "Banana and energy bar",
};

/// Goal-keyed lookup of workout and nutrition templates.
///
/// Maintenance uses the general-fitness default; the other three goals override it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanTemplateSelector;

impl PlanTemplateSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self, goal: Goal, gender: Gender) -> (WorkoutTemplate, NutritionTemplate) {
        let (workout, macros, meals) = match goal {
            Goal::WeightLoss => (FAT_LOSS, DEFICIT_MACROS, DEFICIT_MEALS),
            Goal::MuscleGain => (HYPERTROPHY, SURPLUS_MACROS, SURPLUS_MEALS),
            Goal::Endurance => (CARDIO_BASE, CARB_LOADED_MACROS, CARB_LOADED_MEALS),
            Goal::Maintenance => (GENERAL_FITNESS, BALANCED_MACROS, BALANCED_MEALS),
        };

        let nutrition = NutritionTemplate {
            calories: calorie_target(goal, gender),
            macros,
            meals,
        };

        (workout, nutrition)
    }
}

pub fn calorie_baseline(gender: Gender) -> u32 {
    match gender {
        Gender::Female => FEMALE_BASE_CALORIES,
        Gender::Male | Gender::Other => BASE_CALORIES,
    }
}

/// Gender baseline shifted by the goal's surplus or deficit.
pub fn calorie_target(goal: Goal, gender: Gender) -> u32 {
    let baseline = calorie_baseline(gender);
    match goal {
        Goal::WeightLoss => baseline - 300,
        Goal::MuscleGain => baseline + 500,
        Goal::Endurance => baseline + 300,
        Goal::Maintenance => baseline,
    }
}
