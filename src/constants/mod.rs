pub mod building_prompt;
