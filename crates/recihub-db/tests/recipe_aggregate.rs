//! Integration tests for recipe aggregate persistence.
//!
//! Runs the `SQLite` repository against an in-memory database and checks the
//! behaviour callers rely on: all-or-nothing inserts, update-by-diff of
//! ingredients and steps, and owner scoping of child ids.

use recihub_core::{Ingredient, Recipe, RecipeRepository, RecipeRepositoryError, Step};
use recihub_db::TestDb;

fn names(recipe: &Recipe) -> Vec<&str> {
    recipe.ingredients.iter().map(|i| i.name.as_str()).collect()
}

fn step_pairs(recipe: &Recipe) -> Vec<(i64, &str)> {
    recipe
        .steps
        .iter()
        .map(|s| (s.step_number, s.description.as_str()))
        .collect()
}

async fn ingredient_rows(db: &TestDb) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM ingredient")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_insert_then_fetch_returns_identical_aggregate() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();

    let created = repo
        .insert_recipe(
            Recipe::new("Soup", "alice").with_ingredient(Ingredient::new("Salt", "1", "tsp")),
        )
        .await
        .unwrap();

    assert!(created.id > 0);
    assert!(created.ingredients[0].id > 0);

    let fetched = repo.select_recipe_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_failed_ingredient_insert_leaves_nothing_behind() {
    let db = TestDb::new().await.unwrap();
    db.fail_ingredient_inserts_named("Poison").await.unwrap();
    let repo = db.recipe_repository();

    let recipe = Recipe::new("Soup", "alice")
        .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
        .with_ingredient(Ingredient::existing(1, "Poison", "1", "drop"))
        .with_step(Step::new(1, "Boil"));
    let err = repo.insert_recipe(recipe).await.unwrap_err();

    assert!(matches!(err, RecipeRepositoryError::TransactionFailed(_)));
    assert!(matches!(
        err.root_cause(),
        RecipeRepositoryError::Store { operation: "insert recipe", .. }
    ));

    // The parent row was rolled back together with the first ingredient
    assert!(matches!(
        repo.select_recipe_by_id(1).await,
        Err(RecipeRepositoryError::NotFound(1))
    ));
    assert_eq!(repo.select_recipe_count_by_owner("alice").await.unwrap(), 0);
    assert_eq!(ingredient_rows(&db).await, 0);
}

#[tokio::test]
async fn test_update_replaces_ingredients_by_diff() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut recipe = repo
        .insert_recipe(
            Recipe::new("Soup", "alice")
                .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
                .with_ingredient(Ingredient::new("Pepper", "1", "pinch")),
        )
        .await
        .unwrap();
    let salt_id = recipe.ingredients[0].id;
    let pepper_id = recipe.ingredients[1].id;

    recipe.ingredients = vec![
        Ingredient::existing(salt_id, "Salt-updated", "2", "tbsp"),
        Ingredient::new("Sugar", "3", "g"),
    ];
    let updated = repo.update_recipe(recipe).await.unwrap();

    let fetched = repo.select_recipe_by_id(updated.id).await.unwrap();
    assert_eq!(fetched.ingredients, updated.ingredients);
    assert_eq!(names(&fetched), ["Salt-updated", "Sugar"]);

    let salt = &fetched.ingredients[0];
    assert_eq!(salt.id, salt_id);
    assert_eq!((salt.amount.as_str(), salt.unit.as_str()), ("2", "tbsp"));

    let sugar = &fetched.ingredients[1];
    assert!(sugar.id > pepper_id);
    assert!(fetched.ingredients.iter().all(|i| i.id != pepper_id));
}

#[tokio::test]
async fn test_update_with_only_new_ingredients_drops_all_old_rows() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut recipe = repo
        .insert_recipe(
            Recipe::new("Soup", "alice")
                .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
                .with_ingredient(Ingredient::new("Pepper", "1", "pinch")),
        )
        .await
        .unwrap();

    recipe.ingredients = vec![Ingredient::new("Leek", "1", "whole")];
    repo.update_recipe(recipe.clone()).await.unwrap();

    let fetched = repo.select_recipe_by_id(recipe.id).await.unwrap();
    assert_eq!(names(&fetched), ["Leek"]);
    assert_eq!(ingredient_rows(&db).await, 1);
}

#[tokio::test]
async fn test_update_upserts_steps_and_removes_stale_numbers() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut recipe = repo
        .insert_recipe(
            Recipe::new("Soup", "alice")
                .with_step(Step::new(1, "Boil"))
                .with_step(Step::new(2, "Stir")),
        )
        .await
        .unwrap();

    recipe.steps = vec![Step::new(3, "Serve"), Step::new(1, "Boil water")];
    let updated = repo.update_recipe(recipe).await.unwrap();

    assert_eq!(step_pairs(&updated), [(1, "Boil water"), (3, "Serve")]);
    let fetched = repo.select_recipe_by_id(updated.id).await.unwrap();
    assert_eq!(fetched.steps, updated.steps);
}

#[tokio::test]
async fn test_identical_update_is_idempotent() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut recipe = repo
        .insert_recipe(
            Recipe::new("Soup", "alice")
                .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
                .with_step(Step::new(1, "Boil")),
        )
        .await
        .unwrap();

    recipe.ingredients.push(Ingredient::new("Sugar", "3", "g"));
    recipe.steps.push(Step::new(2, "Stir"));
    let first = repo.update_recipe(recipe).await.unwrap();
    let after_first = repo.select_recipe_by_id(first.id).await.unwrap();

    let second = repo.update_recipe(first.clone()).await.unwrap();
    let after_second = repo.select_recipe_by_id(second.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    assert_eq!(ingredient_rows(&db).await, 2);
}

#[tokio::test]
async fn test_foreign_ingredient_id_is_rejected_and_untouched() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut mine = repo
        .insert_recipe(
            Recipe::new("Soup", "alice").with_ingredient(Ingredient::new("Salt", "1", "tsp")),
        )
        .await
        .unwrap();
    let theirs = repo
        .insert_recipe(
            Recipe::new("Cake", "bob").with_ingredient(Ingredient::new("Flour", "2", "cups")),
        )
        .await
        .unwrap();
    let foreign_id = theirs.ingredients[0].id;

    mine.name = "Hijacked Soup".to_string();
    mine.ingredients = vec![Ingredient::existing(foreign_id, "Sawdust", "9", "kg")];
    let err = repo.update_recipe(mine.clone()).await.unwrap_err();

    assert!(matches!(
        err.root_cause(),
        RecipeRepositoryError::Store { operation: "ingredient reconciliation", .. }
    ));

    // Neither recipe changed
    let theirs_after = repo.select_recipe_by_id(theirs.id).await.unwrap();
    assert_eq!(theirs_after, theirs);
    let mine_after = repo.select_recipe_by_id(mine.id).await.unwrap();
    assert_eq!(mine_after.name, "Soup");
    assert_eq!(names(&mine_after), ["Salt"]);
}

#[tokio::test]
async fn test_update_of_one_recipe_does_not_touch_another() {
    let db = TestDb::new().await.unwrap();
    let repo = db.recipe_repository();
    let mut soup = repo
        .insert_recipe(
            Recipe::new("Soup", "alice")
                .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
                .with_step(Step::new(1, "Boil")),
        )
        .await
        .unwrap();
    let cake = repo
        .insert_recipe(
            Recipe::new("Cake", "alice")
                .with_ingredient(Ingredient::new("Flour", "2", "cups"))
                .with_step(Step::new(1, "Mix")),
        )
        .await
        .unwrap();

    soup.ingredients.clear();
    soup.steps = vec![Step::new(5, "Serve")];
    repo.update_recipe(soup).await.unwrap();

    assert_eq!(repo.select_recipe_by_id(cake.id).await.unwrap(), cake);
}

#[tokio::test]
async fn test_service_round_trip() {
    let db = TestDb::new().await.unwrap();
    let service = db.recipe_service();

    let created = service
        .create_recipe(
            Recipe::new("Soup", "alice")
                .with_ingredient(Ingredient::new("Salt", "1", "tsp"))
                .with_step(Step::new(1, "Boil")),
        )
        .await
        .unwrap();
    service
        .update_image_name(created.id, "alice", "soup.png")
        .await
        .unwrap();

    let mut edit = created.clone();
    edit.name = "Better Soup".to_string();
    let updated = service.update_recipe(edit).await.unwrap();
    assert_eq!(updated.image_name, "soup.png");

    let page = service
        .get_recipes_for_owner("alice", "name desc", 0, 0)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.recipes[0].name, "Better Soup");

    service.remove_recipe(created.id, "alice").await.unwrap();
    assert!(matches!(
        service.get_recipe(created.id).await,
        Err(recihub_core::RecipeServiceError::NotFound(_))
    ));
}
