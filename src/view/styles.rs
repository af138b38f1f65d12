//! Stylesheet injected alongside the widget

/// Class of the injected `<style>` element
pub const STYLE_CLASS: &str = "ebebek-carousel-style";

/// Stylesheet for the carousel, scoped by the `ebebek-` class prefix
pub const STYLESHEET: &str = r#"
.ebebek-carousel-container {
  width: 100%;
  max-width: 1200px;
  margin: 0 auto;
  padding: 0;
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  position: relative;
  z-index: 1000;
}
.ebebek-carousel-title {
  font-size: 28px;
  font-weight: 700;
  color: #333;
  text-align: center;
  margin: 40px 0 30px 0;
  letter-spacing: -0.5px;
}
.ebebek-carousel-wrapper {
  position: relative;
  overflow: hidden;
  background: #fff;
  border-radius: 12px;
  padding: 30px 0;
  box-shadow: 0 4px 20px rgba(0,0,0,0.08);
  border: 1px solid #f0f0f0;
}
.ebebek-carousel-track {
  display: flex;
  transition: transform 0.4s ease-in-out;
  padding: 0 30px;
}
.ebebek-product-card {
  min-width: calc(20% - 20px);
  background: #fff;
  border: 1px solid #e8e8e8;
  border-radius: 10px;
  position: relative;
  transition: all 0.3s ease;
  margin-right: 20px;
  overflow: hidden;
  display: flex;
  flex-direction: column;
  box-shadow: 0 2px 8px rgba(0,0,0,0.04);
}
.ebebek-product-card:last-child { margin-right: 0; }
.ebebek-product-card:hover {
  border-color: #ff6b35;
  box-shadow: 0 8px 25px rgba(255, 107, 53, 0.15);
  transform: translateY(-2px);
}
.ebebek-product-image-container {
  position: relative;
  height: 220px;
  overflow: hidden;
  background: #fafafa;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 20px;
}
.ebebek-product-image {
  width: 100%;
  height: 100%;
  object-fit: contain;
  transition: transform 0.3s ease;
}
.ebebek-product-card:hover .ebebek-product-image { transform: scale(1.05); }
.ebebek-favorite-btn {
  position: absolute;
  top: 15px;
  right: 15px;
  background: rgba(255,255,255,0.95);
  border: 1px solid #e0e0e0;
  border-radius: 50%;
  width: 36px;
  height: 36px;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  transition: all 0.3s ease;
  z-index: 3;
  font-size: 18px;
  color: #bbb;
  box-shadow: 0 2px 6px rgba(0,0,0,0.1);
}
.ebebek-favorite-btn:hover,
.ebebek-favorite-btn.active {
  color: #ff6b35;
  background: #fff;
  border-color: #ff6b35;
}
.ebebek-product-info {
  padding: 20px;
  flex: 1;
  display: flex;
  flex-direction: column;
}
.ebebek-product-brand {
  color: #888;
  font-size: 13px;
  font-weight: 600;
  margin-bottom: 8px;
  text-transform: uppercase;
}
.ebebek-product-name {
  color: #333;
  font-size: 15px;
  font-weight: 600;
  margin-bottom: 15px;
  line-height: 1.4;
  overflow: hidden;
  min-height: 42px;
}
.ebebek-rating {
  display: flex;
  align-items: center;
  gap: 8px;
  margin-bottom: 15px;
}
.ebebek-stars { display: flex; gap: 3px; }
.ebebek-star { color: #ffd700; font-size: 16px; }
.ebebek-star.empty { color: #ddd; }
.ebebek-review-count { color: #999; font-size: 13px; font-weight: 500; }
.ebebek-pricing { margin-bottom: 20px; margin-top: auto; }
.ebebek-price-row {
  display: flex;
  align-items: center;
  gap: 10px;
  margin-bottom: 8px;
  flex-wrap: wrap;
}
.ebebek-original-price {
  font-size: 14px;
  color: #999;
  text-decoration: line-through;
  font-weight: 500;
}
.ebebek-discount {
  color: #28a745;
  font-size: 13px;
  font-weight: 700;
  display: flex;
  align-items: center;
  gap: 3px;
}
.ebebek-discount::before { content: '↓'; font-size: 11px; }
.ebebek-current-price { font-size: 20px; font-weight: 800; color: #28a745; }
.ebebek-current-price.no-discount { color: #333; }
.ebebek-add-to-cart-btn {
  width: 100%;
  background: linear-gradient(135deg, #ff6b35, #f7931e);
  color: white;
  border: none;
  padding: 14px;
  border-radius: 8px;
  font-size: 15px;
  font-weight: 700;
  cursor: pointer;
  transition: all 0.3s ease;
  margin-top: auto;
  box-shadow: 0 4px 12px rgba(255, 107, 53, 0.3);
}
.ebebek-add-to-cart-btn:hover {
  background: linear-gradient(135deg, #e55a2b, #e0851a);
  transform: translateY(-2px);
}
.ebebek-carousel-nav {
  position: absolute;
  top: 50%;
  transform: translateY(-50%);
  background: #fff;
  border: 2px solid #e0e0e0;
  border-radius: 50%;
  width: 48px;
  height: 48px;
  cursor: pointer;
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: 20px;
  color: #666;
  transition: all 0.3s ease;
  z-index: 3;
  box-shadow: 0 4px 12px rgba(0,0,0,0.1);
}
.ebebek-carousel-nav:hover {
  background: #ff6b35;
  color: white;
  border-color: #ff6b35;
  transform: translateY(-50%) scale(1.1);
}
.ebebek-carousel-nav.prev { left: 15px; }
.ebebek-carousel-nav.next { right: 15px; }
.ebebek-carousel-nav:disabled {
  opacity: 0.5;
  cursor: not-allowed;
  transform: translateY(-50%) scale(1);
}
.ebebek-carousel-dots {
  display: flex;
  justify-content: center;
  gap: 10px;
  margin-top: 25px;
}
.ebebek-dot {
  width: 10px;
  height: 10px;
  border-radius: 50%;
  background: #ddd;
  cursor: pointer;
  transition: all 0.3s ease;
}
.ebebek-dot.active { background: #ff6b35; transform: scale(1.3); }
"#;
