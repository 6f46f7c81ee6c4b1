use serde::Serialize;

use crate::{Recipe, RecipeType};

/// The recipes known to the session plus the in-progress edit pointer.
///
/// Recipes are referenced by name only. Names are not checked for uniqueness;
/// every lookup returns the first match.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Catalog {
    #[serde(rename = "recetas")]
    recipes: Vec<Recipe>,
    #[serde(rename = "editando")]
    editing: Option<usize>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            editing: None,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn of_type(&self, recipe_type: RecipeType) -> impl Iterator<Item = &Recipe> {
        self.recipes
            .iter()
            .filter(move |r| r.recipe_type == recipe_type)
    }

    /// Distinct ingredient names in first-encounter order, as written in the recipes.
    pub fn ingredient_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for ingredient in self.recipes.iter().flat_map(|r| &r.ingredients) {
            if !names.contains(&ingredient.name.as_str()) {
                names.push(&ingredient.name);
            }
        }
        names
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Point the next [`Catalog::add_or_update`] at the recipe at `index`.
    pub fn begin_edit(&mut self, index: usize) -> Option<&Recipe> {
        let recipe = self.recipes.get(index)?;
        self.editing = Some(index);
        Some(recipe)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Replace the recipe being edited, or append when no edit is in progress.
    /// Returns the index the recipe now lives at.
    pub fn add_or_update(&mut self, recipe: Recipe) -> usize {
        match self.editing.take() {
            Some(index) if index < self.recipes.len() => {
                self.recipes[index] = recipe;
                index
            }
            _ => {
                self.recipes.push(recipe);
                self.recipes.len() - 1
            }
        }
    }

    /// Remove every recipe named exactly `name`. Returns how many were removed.
    ///
    /// An edit pointing at a removed recipe is cleared; any other edit keeps
    /// pointing at the same recipe after the shift.
    pub fn delete(&mut self, name: &str) -> usize {
        if let Some(index) = self.editing {
            self.editing = match self.recipes.get(index) {
                Some(recipe) if recipe.name == name => None,
                Some(_) => {
                    let removed_before = self.recipes[..index]
                        .iter()
                        .filter(|r| r.name == name)
                        .count();
                    Some(index - removed_before)
                }
                None => None,
            };
        }

        let before = self.recipes.len();
        self.recipes.retain(|r| r.name != name);
        before - self.recipes.len()
    }
}

impl From<Vec<Recipe>> for Catalog {
    fn from(value: Vec<Recipe>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ingredient;

    fn recipe(name: &str, recipe_type: RecipeType) -> Recipe {
        Recipe::new(name, recipe_type, vec![Ingredient::new("Sal", "g", 1.0)])
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            recipe("Arroz", RecipeType::Principal),
            recipe("Flan", RecipeType::Postre),
            recipe("Arroz", RecipeType::Acompanamiento),
            recipe("Ensalada", RecipeType::Acompanamiento),
        ])
    }

    #[test]
    fn find_returns_first_match() {
        let catalog = sample();
        assert_eq!(
            catalog.find("Arroz").map(|r| r.recipe_type),
            Some(RecipeType::Principal)
        );
        assert!(catalog.find("arroz").is_none());
    }

    #[test]
    fn add_appends_without_uniqueness_check() {
        let mut catalog = sample();
        let index = catalog.add_or_update(recipe("Flan", RecipeType::Postre));

        assert_eq!(index, 4);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.of_type(RecipeType::Postre).count(), 2);
    }

    #[test]
    fn update_replaces_edited_recipe_in_place() {
        let mut catalog = sample();
        assert_eq!(catalog.begin_edit(1).map(|r| r.name.as_str()), Some("Flan"));

        let index = catalog.add_or_update(recipe("Flan casero", RecipeType::Postre));

        assert_eq!(index, 1);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.recipes()[1].name, "Flan casero");
        assert_eq!(catalog.editing(), None);
    }

    #[test]
    fn begin_edit_out_of_range_is_ignored() {
        let mut catalog = sample();
        assert!(catalog.begin_edit(9).is_none());
        assert_eq!(catalog.editing(), None);
    }

    #[test]
    fn delete_removes_all_with_name() {
        let mut catalog = sample();
        assert_eq!(catalog.delete("Arroz"), 2);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.delete("Arroz"), 0);
    }

    #[test]
    fn delete_clears_edit_of_removed_recipe() {
        let mut catalog = sample();
        catalog.begin_edit(2);
        catalog.delete("Arroz");
        assert_eq!(catalog.editing(), None);
    }

    #[test]
    fn delete_shifts_edit_of_surviving_recipe() {
        let mut catalog = sample();
        catalog.begin_edit(3);
        catalog.delete("Arroz");

        let index = catalog.editing().unwrap();
        assert_eq!(catalog.recipes()[index].name, "Ensalada");
    }

    #[test]
    fn ingredient_names_are_distinct_in_order() {
        let catalog = Catalog::new(vec![
            Recipe::new(
                "Guiso",
                RecipeType::Principal,
                vec![
                    Ingredient::new("Carne", "g", 120.0),
                    Ingredient::new("Papa", "g", 100.0),
                ],
            ),
            Recipe::new(
                "Pure",
                RecipeType::Acompanamiento,
                vec![
                    Ingredient::new("Papa", "g", 150.0),
                    Ingredient::new("Leche", "ml", 30.0),
                ],
            ),
        ]);

        assert_eq!(catalog.ingredient_names(), ["Carne", "Papa", "Leche"]);
    }
}
