use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Достаёт Bearer-токен из заголовка Authorization.
/// Токен копируется в String, чтобы не держать заимствование
/// запроса через await при проверке подписи
fn bearer_token(req: &Request<Body>) -> Result<String, StatusCode> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(StatusCode::UNAUTHORIZED)
}

/// Все бизнес-маршруты закрыты этим middleware: без валидного
/// access-токена запрос не доходит до обработчика
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;

    let claims = super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Claims доступны обработчикам через extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Управление пользователями доступно только администратору
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;

    let claims = super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(value: &str) -> Request<Body> {
        Request::builder()
            .header("Authorization", value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn bearer_token_strips_prefix() {
        let req = request_with_header("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&req).as_deref(), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        let req = Request::new(Body::empty());
        assert_eq!(bearer_token(&req), Err(StatusCode::UNAUTHORIZED));

        let req = request_with_header("Basic abc");
        assert_eq!(bearer_token(&req), Err(StatusCode::UNAUTHORIZED));
    }
}
