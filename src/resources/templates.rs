//! Embedded template and documentation bodies served as resources.

pub const WEB_STACK_TEMPLATE: &str = r#"version: '3.8'
services:
  nginx:
    image: nginx:latest
    ports:
      - "80:80"
    depends_on:
      - backend
  backend:
    image: python:3.9-slim
    environment:
      - DATABASE_URL=postgres://db:5432
    depends_on:
      - db
  db:
    image: postgres:13
    environment:
      - POSTGRES_PASSWORD=example
    volumes:
      - db_data:/var/lib/postgresql/data

volumes:
  db_data:
"#;

pub const DATABASE_TEMPLATE: &str = r#"version: '3.8'
services:
  db:
    image: postgres:13
    environment:
      - POSTGRES_PASSWORD=${DB_PASSWORD}
      - POSTGRES_DB=${DB_NAME}
    volumes:
      - db_data:/var/lib/postgresql/data
    ports:
      - "5432:5432"

volumes:
  db_data:
    driver: local
"#;

pub const NGINX_CONFIG: &str = r#"{
    "image": "nginx:latest",
    "name": "web-server",
    "ports": {
        "80": "80",
        "443": "443"
    },
    "environment": {
        "NGINX_HOST": "localhost",
        "NGINX_PORT": "80"
    },
    "volumes": [
        "/etc/nginx/conf.d:/etc/nginx/conf.d"
    ]
}
"#;

pub const DEPLOYMENT_GUIDE: &str = r#"# Docker Deployment Best Practices

## Container Guidelines
1. Use specific version tags for images
2. Implement health checks
3. Set resource limits

## Compose Guidelines
1. Use version 3.8 or higher
2. Define networks explicitly
3. Use secrets for sensitive data

## Security Guidelines
1. Run containers as non-root
2. Scan images for vulnerabilities
3. Use read-only root filesystem
"#;
