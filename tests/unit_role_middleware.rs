use freelearn::middleware::auth::{AccessError, AuthUser, bearer_token};
use freelearn::middleware::role::check_role;
use freelearn::freelearn_models::{Role, UserId};

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser {
        user_id: UserId::new(),
        email: "test@example.com".to_string(),
        role,
    }
}

#[test]
fn test_professor_passes_professor_check() {
    let auth_user = create_test_auth_user(Role::Professor);
    assert!(check_role(&auth_user, Role::Professor).is_ok());
}

#[test]
fn test_student_fails_professor_check() {
    let auth_user = create_test_auth_user(Role::Student);
    let err = check_role(&auth_user, Role::Professor).unwrap_err();
    assert!(matches!(err, AccessError::NotProfessor));
}

#[test]
fn test_student_requirement_admits_everyone() {
    for role in [Role::Student, Role::Professor] {
        let auth_user = create_test_auth_user(role);
        assert!(check_role(&auth_user, Role::Student).is_ok());
    }
}

#[test]
fn test_bearer_token_accepts_two_parts() {
    assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
}

#[test]
fn test_bearer_token_rejects_other_shapes() {
    for header in ["", "Bearer", "abc.def.ghi", "Basic abc", "Bearer a b", "Bearer  abc"] {
        assert!(
            matches!(bearer_token(header), Err(AccessError::MalformedHeader)),
            "header {header:?}"
        );
    }
}
