//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 기동 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 요약을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              DOCTOR RECORD SERVICE               ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Connecting to storage
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 하위 작업의 상태를 들여쓰기하여 표시합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("    • {:<28} {}", name, status);
}

/// 진행 단계 완료를 표시합니다
pub fn print_step_complete(step: u8, description: &str) {
    println!("✓ Step {}: {}", step, description);
}

/// 기동 완료 요약을 출력합니다
///
/// ```text
/// ──────────────────────────────────────────────────
///   Storage : mongodb
///   Bind    : 0.0.0.0:8080
/// ──────────────────────────────────────────────────
/// ```
pub fn print_final_summary(storage: &str, bind_address: &str) {
    let rule = "─".repeat(50);

    println!("{}", rule);
    println!("  Storage : {}", storage);
    println!("  Bind    : {}", bind_address);
    println!("{}", rule);
}
