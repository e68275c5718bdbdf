//! DemoUser entity <-> model mapper

use demo_core::DemoUser;

use crate::models::DemoUserModel;

/// Convert DemoUserModel to DemoUser entity
impl From<DemoUserModel> for DemoUser {
    fn from(model: DemoUserModel) -> Self {
        DemoUser::new(model.id, model.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_entity() {
        let model = DemoUserModel {
            id: 7,
            username: "fred".to_string(),
        };
        assert_eq!(DemoUser::from(model), DemoUser::new(7, "fred"));
    }
}
